//! Lyrics module for parsing, reviewing and displaying synchronized lyrics
//!
//! This module provides:
//! - LRC format parser for synchronized lyrics
//! - Line-level diff of suggested lyric edits
//! - Playback synchronizer tracking the active line

pub mod diff;
pub mod parser;
pub mod sync;

pub use diff::{diff, DiffKind, DiffSegment, DiffStats};
pub use parser::{format_timestamp, looks_like_lrc, parse, parse_plain, LyricLine};
pub use sync::{DisplayMode, LyricsView, Synchronizer};

/// Lyrics picked for a song, synced when possible.
#[derive(Debug, Clone, PartialEq)]
pub struct Lyrics {
    pub lines: Vec<LyricLine>,
    /// Whether the lines carry real timestamps
    pub synced: bool,
}

impl Lyrics {
    /// Try synced lyrics first, fall back to plain. `None` when neither
    /// source yields a single line.
    pub fn from_sources(synced: Option<&str>, plain: Option<&str>) -> Option<Self> {
        if let Some(raw) = synced
            && !raw.trim().is_empty()
        {
            let lines = parse(raw);
            if !lines.is_empty() {
                return Some(Self { lines, synced: true });
            }
        }
        if let Some(raw) = plain {
            let lines = parse_plain(raw);
            if !lines.is_empty() {
                return Some(Self { lines, synced: false });
            }
        }
        None
    }
}
