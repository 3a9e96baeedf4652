//! Drag trackers for the UV viewport
//!
//! - `BoxSelectTracker`: rectangle selection in viewport space
//! - `DragTranslator`: moves the selected UVs with the pointer

mod box_select;
mod translator;

pub use box_select::*;
pub use translator::*;
