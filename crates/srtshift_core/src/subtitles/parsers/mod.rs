//! Format-specific subtitle parsers.

mod srt;

pub use srt::parse_srt;
