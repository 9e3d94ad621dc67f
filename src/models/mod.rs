pub mod api;
pub mod common;
pub mod gemini;
pub mod generation;
pub mod image;

pub use api::*;
pub use common::*;
pub use generation::*;
pub use image::*;
