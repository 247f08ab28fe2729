//! Phase State Machine
//!
//! Manages the app-level phases: menus, match play, pause and game over.

use serde::Serialize;

/// Bot difficulty, chosen from the difficulty menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Difficulty {
    SuperEasy,
    Easy,
    #[default]
    Middle,
    Hard,
}

impl Difficulty {
    /// Fraction of the distance to the ball the bot paddle closes per tick
    pub fn lerp_factor(self) -> f32 {
        match self {
            Difficulty::SuperEasy => 0.04,
            Difficulty::Easy => 0.08,
            Difficulty::Middle => 0.15,
            Difficulty::Hard => 0.25,
        }
    }
}

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameMode {
    Bot(Difficulty),
    Pvp,
}

impl GameMode {
    pub fn is_pvp(self) -> bool {
        matches!(self, GameMode::Pvp)
    }
}

/// Phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Menu,
    DifficultySelect,
    ConfirmExit,
    Playing,
    Paused,
    GameOver,
    Exited,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ChooseBot,
    StartPvp,
    RequestExit,
    ConfirmExit,
    Back,
    StartBot(Difficulty),
    Pause,
    Resume,
    Restart,
    QuitToMenu,
    MatchOver,
    ReturnToMenu,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: Phase,
    pub to: Phase,
    pub action: Action,
}

/// Phase Finite State Machine
#[derive(Debug, Clone)]
pub struct PhaseFsm {
    phase: Phase,
}

impl PhaseFsm {
    pub fn new() -> Self {
        Self { phase: Phase::Menu }
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: Action) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: Action) -> TransitionResult {
        let from = self.phase;

        match self.next_phase(action) {
            Some(to) => {
                self.phase = to;
                TransitionResult {
                    success: true,
                    from,
                    to,
                    action,
                }
            }
            None => TransitionResult {
                success: false,
                from,
                to: from,
                action,
            },
        }
    }

    /// Get next phase for a given action (if valid)
    fn next_phase(&self, action: Action) -> Option<Phase> {
        match (self.phase, action) {
            // From Menu
            (Phase::Menu, Action::ChooseBot) => Some(Phase::DifficultySelect),
            (Phase::Menu, Action::StartPvp) => Some(Phase::Playing),
            (Phase::Menu, Action::RequestExit) => Some(Phase::ConfirmExit),

            // From DifficultySelect
            (Phase::DifficultySelect, Action::StartBot(_)) => Some(Phase::Playing),
            (Phase::DifficultySelect, Action::Back) => Some(Phase::Menu),

            // From ConfirmExit
            (Phase::ConfirmExit, Action::ConfirmExit) => Some(Phase::Exited),
            (Phase::ConfirmExit, Action::Back) => Some(Phase::Menu),

            // From Playing
            (Phase::Playing, Action::Pause) => Some(Phase::Paused),
            (Phase::Playing, Action::MatchOver) => Some(Phase::GameOver),

            // From Paused
            (Phase::Paused, Action::Resume) => Some(Phase::Playing),
            (Phase::Paused, Action::Restart) => Some(Phase::Playing),
            (Phase::Paused, Action::QuitToMenu) => Some(Phase::Menu),

            // From GameOver
            (Phase::GameOver, Action::ReturnToMenu) => Some(Phase::Menu),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for PhaseFsm {
    fn default() -> Self {
        Self::new()
    }
}
