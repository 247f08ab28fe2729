pub mod arena;
pub mod components;
pub mod config;
pub mod engine;
pub mod fsm;
pub mod math_task;
pub mod menu;
pub mod params;
pub mod powerup;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use arena::*;
pub use components::*;
pub use config::*;
pub use engine::*;
pub use fsm::*;
pub use math_task::*;
pub use menu::*;
pub use params::*;
pub use powerup::*;
pub use resources::*;
pub use snapshot::*;
