//! gapline - Gap buffer text storage engine
//!
//! Holds one editable document: a gap buffer of bytes, an index of line
//! starts, offset/cursor conversion and an undo history.

pub mod buffer;
pub mod constants;
pub mod document;
pub mod error;
pub mod history;
pub mod settings;

pub use buffer::cursor::{Cursor, Span};
pub use buffer::line_ending::LineEnding;
pub use buffer::Buffer;
pub use document::Document;
pub use error::{GapError, Result};
