//! Playback-synchronized lyrics state.
//!
//! The [`Synchronizer`] is driven by the host: `load` when the song (or its
//! lyrics) changes, `advance` on every playback-time tick or seek, and
//! `set_mode` on user request. Calls must come from one logical timeline.

use super::parser::LyricLine;
use crate::error::LyricsError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Hidden,
    Plain,
    #[default]
    Synced,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Synced => DisplayMode::Plain,
            DisplayMode::Plain => DisplayMode::Hidden,
            DisplayMode::Hidden => DisplayMode::Synced,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Hidden => "hidden",
            DisplayMode::Plain => "plain",
            DisplayMode::Synced => "synced",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = LyricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hidden" | "off" => Ok(DisplayMode::Hidden),
            "plain" => Ok(DisplayMode::Plain),
            "synced" | "sync" => Ok(DisplayMode::Synced),
            other => Err(LyricsError::InvalidInput(format!(
                "unknown display mode `{other}`"
            ))),
        }
    }
}

/// What a renderer gets to show for the current mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LyricsView<'a> {
    Hidden,
    Plain(&'a [LyricLine]),
    Synced {
        lines: &'a [LyricLine],
        active: Option<usize>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Synchronizer {
    mode: DisplayMode,
    lines: Vec<LyricLine>,
    active: Option<usize>,
    /// Last valid playback position, used when switching back to synced.
    position: Option<f64>,
}

impl Synchronizer {
    /// Start with a restored mode preference (see [`crate::prefs::restore`]).
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_line(&self) -> Option<&LyricLine> {
        self.active.and_then(|i| self.lines.get(i))
    }

    /// Replace the line sequence for a new song or new lyric text.
    pub fn load(&mut self, lines: Vec<LyricLine>) {
        tracing::debug!(lines = lines.len(), "load lyrics");
        self.lines = lines;
        self.active = None;
        self.position = None;
    }

    /// Recompute the active line for the playback position `seconds`.
    ///
    /// The active line is the last one whose time is not after `seconds`, so
    /// among lines sharing a timestamp the later one wins. Nothing is active
    /// before the first line, when no lines are loaded, or outside synced mode.
    pub fn advance(&mut self, seconds: f64) -> Result<Option<usize>, LyricsError> {
        if !seconds.is_finite() {
            return Err(LyricsError::InvalidInput(format!(
                "playback time must be finite, got {seconds}"
            )));
        }
        self.position = Some(seconds);
        self.active = self.compute_active();
        Ok(self.active)
    }

    /// Switch display mode. Returns the new mode for the host to persist.
    pub fn set_mode(&mut self, mode: DisplayMode) -> DisplayMode {
        if mode != self.mode {
            tracing::debug!(from = %self.mode, to = %mode, "lyrics display mode");
        }
        self.mode = mode;
        self.active = self.compute_active();
        mode
    }

    pub fn view(&self) -> LyricsView<'_> {
        match self.mode {
            DisplayMode::Hidden => LyricsView::Hidden,
            DisplayMode::Plain => LyricsView::Plain(&self.lines),
            DisplayMode::Synced => LyricsView::Synced {
                lines: &self.lines,
                active: self.active,
            },
        }
    }

    /// Index range of the active line with up to `before` lines of context
    /// above and `after` below. Starts at the first line when nothing is
    /// active.
    pub fn window(&self, before: usize, after: usize) -> Range<usize> {
        if self.mode == DisplayMode::Hidden || self.lines.is_empty() {
            return 0..0;
        }
        let current = self.active.unwrap_or(0);
        let start = current.saturating_sub(before);
        let end = (current + after + 1).min(self.lines.len());
        start..end
    }

    fn compute_active(&self) -> Option<usize> {
        if self.mode != DisplayMode::Synced {
            return None;
        }
        let t = self.position?;
        // Lines are in source order, not necessarily sorted by time.
        self.lines.iter().rposition(|l| l.time <= t)
    }
}
