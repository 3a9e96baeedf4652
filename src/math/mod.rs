//! Small 2D math kit: vectors and rectangles

mod rect;
mod vec2;

pub use rect::*;
pub use vec2::*;
