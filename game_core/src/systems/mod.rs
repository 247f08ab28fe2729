pub mod collision;
pub mod movement;
pub mod particles;
pub mod scoring;
pub mod tasks;

pub use collision::*;
pub use movement::*;
pub use particles::*;
pub use scoring::*;
pub use tasks::*;
