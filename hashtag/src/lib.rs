//! Hashtag entry widget.
//!
//! Typing space-separated words into an entry turns each valid word into a
//! clickable chip and mirrors the accepted tags, space-joined, into a hidden
//! field. Clicking a chip removes its tag again.

mod limits;
mod tag_list;
mod widget;

pub use limits::TagLimits;
pub use tag_list::{TagList, TagRejection};
pub use widget::{TAG_CLASS, TAG_DATA_KEY, TagWidget};
