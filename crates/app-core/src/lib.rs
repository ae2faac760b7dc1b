pub mod constants;
pub mod input;
pub mod overlay;
pub mod tracking;
pub static SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");

pub use input::*;
pub use tracking::*;
