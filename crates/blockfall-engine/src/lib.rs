pub use self::{config::*, core::*, engine::*, render::*};

pub mod config;
pub mod core;
pub mod engine;
pub mod render;
