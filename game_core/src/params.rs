/// Game tuning parameters for Hand Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Loop
    pub const FPS: u32 = 60;
    pub const MAX_DT: f32 = 0.25; // Clamp to prevent large jumps

    // Arena (playfield coordinates, origin top-left, y grows downwards)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 900.0;
    pub const PADDLE_INSET: f32 = 30.0; // Gap between arena edge and paddle
    pub const SCORE_MARGIN: f32 = 20.0; // Ball must travel this far past the edge

    // Paddle
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 140.0;
    pub const KEYBOARD_SPEED: f32 = 1000.0; // units per second
    pub const TRAIL_LENGTH: usize = 12;

    // Hand angle mapping (degrees)
    pub const PADDLE_ANGLE_UP: f32 = 100.0;
    pub const PADDLE_ANGLE_DOWN: f32 = 250.0;

    // Ball (velocities are per tick)
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_START_SPEED: f32 = 15.0;
    pub const BALL_MAX_SPEED: f32 = 25.0;
    pub const MAX_BOUNCE_ANGLE: f32 = 50.0; // degrees
    pub const SERVE_SPREAD: f32 = 0.5; // vy = speed * U(-spread, spread)
    pub const TRAMPOLINE_BOOST: f32 = 1.7;
    pub const GHOST_FLICKER_HZ: f32 = 6.0;

    // Levelling
    pub const HITS_PER_LEVEL: u32 = 5;
    pub const SPEED_INCREMENT_PER_LEVEL: f32 = 2.0;

    // Match
    pub const WIN_SCORE: u32 = 5;
    pub const TIME_LIMIT: f32 = 120.0; // seconds

    // Math tasks
    pub const MATH_TASK_DURATION: f32 = 10.0;
    pub const MATH_TASK_INTERVAL: f32 = 25.0;
    pub const MATH_TASK_MAX_ATTEMPTS: u32 = 100;
    pub const MATH_ANSWER_MAX: i32 = 5;

    // Powerups
    pub const POWERUP_DURATION: f32 = 15.0;
    pub const ENLARGE_FACTOR: f32 = 1.5;
    pub const SHRINK_FACTOR: f32 = 0.5;

    // Particles
    pub const PARTICLE_DECAY: f32 = 0.05; // life lost per tick
    pub const PARTICLE_SPEED: f32 = 3.0;
    pub const COLLISION_PARTICLES: usize = 8;
    pub const TRAMPOLINE_PARTICLES: usize = 12;
    pub const FIREWORK_PARTICLES: usize = 40;
    pub const FIREWORK_SPEED_SCALE: f32 = 3.0;

    // Menus
    pub const MENU_TRANSITION_DELAY: f32 = 0.2;
    pub const MENU_HOLD_TIME: f32 = 1.5;
    pub const PAUSE_SELECTION_TIME: f32 = 2.0;

    // Colors
    pub const COLOR_P1: [u8; 3] = [0, 255, 255]; // Cyan
    pub const COLOR_P2: [u8; 3] = [255, 0, 255]; // Magenta
    pub const COLOR_GOLD: [u8; 3] = [255, 215, 0];
}
