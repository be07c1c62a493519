//! Simulated playback clock.
//!
//! There is no audio here: the clock turns wall time into a playback position
//! and a ticker task reports it to the app loop at a fixed interval.

pub mod clock;

pub use clock::{spawn_ticker, PlaybackClock};
