pub mod color;
pub mod config;
pub mod constants;
pub mod dot;
pub mod field;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use dot::*;
pub use field::*;
