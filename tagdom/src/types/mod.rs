mod color;
mod edges;
mod enums;
mod style;

pub use color::{Color, Rgb};
pub use edges::Edges;
pub use enums::{Border, Direction, Size, TextStyle, Wrap};
pub use style::Style;
