//! lyricsync - synchronized lyrics toolkit
//!
//! Parses LRC lyric files, diffs suggested lyric edits against the canonical
//! text, and tracks the active line against a playback clock. The `app`,
//! `config`, `input`, `player` and `prefs` modules are the host pieces used by
//! the `lyricsync` binary.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod lyrics;
pub mod player;
pub mod prefs;

pub use error::LyricsError;
