use crate::app::events::{Event, PlayerEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    /// Position at the moment `started` was taken, or the paused position
    base: f64,
    speed: f64,
    started: Option<Instant>,
}

impl PlaybackClock {
    /// A running clock positioned at `start` seconds.
    pub fn new(start: f64, speed: f64, now: Instant) -> Self {
        Self {
            base: start.max(0.0),
            speed: if speed.is_finite() && speed > 0.0 { speed } else { 1.0 },
            started: Some(now),
        }
    }

    pub fn position_at(&self, now: Instant) -> f64 {
        match self.started {
            Some(t0) => self.base + now.saturating_duration_since(t0).as_secs_f64() * self.speed,
            None => self.base,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.started.is_none()
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.base = self.position_at(now);
        self.started = match self.started {
            Some(_) => None,
            None => Some(now),
        };
    }

    /// Jump to `seconds`, keeping the paused/running state.
    pub fn seek(&mut self, seconds: f64, now: Instant) {
        self.base = seconds.max(0.0);
        if self.started.is_some() {
            self.started = Some(now);
        }
    }
}

/// Send a position tick every `period` until the receiver goes away.
pub fn spawn_ticker(tx: mpsc::Sender<Event>, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(Event::Player(PlayerEvent::Tick)).await.is_err() {
                break;
            }
        }
    });
}
