//! mkml-core: geometry, colors and the display list shared by every mkml crate.

mod color;
pub mod display_list;
pub mod scene;

pub use display_list::{Command, DisplayList, Viewport};
pub use scene::{Color, Point, Rect};
