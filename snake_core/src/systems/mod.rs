pub mod collision;
pub mod effects;
pub mod food;
pub mod input;
pub mod movement;
pub mod scoring;

pub use collision::*;
pub use effects::*;
pub use food::*;
pub use input::*;
pub use movement::*;
pub use scoring::*;
