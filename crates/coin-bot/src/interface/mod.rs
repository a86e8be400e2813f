//! Bot platform interfaces
//!
//! Platform-agnostic response types and formatting

pub mod formatter;
pub mod interface;

pub use formatter::{Formatter, FormatterFactory, MarkdownFormatter, PlainFormatter, strip_markdown};
pub use interface::{BotPlatform, BotResponse, ResponseType};
