pub mod actions;
pub mod events;

use crate::config::Config;
use crate::input;
use crate::lyrics::{format_timestamp, DisplayMode, Lyrics, LyricsView, Synchronizer};
use crate::player::{self, PlaybackClock};
use crate::prefs::{self, ModePreference};
use actions::Action;
use events::{Event, InputEvent, PlayerEvent};
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const SEEK_STEP_SECS: f64 = 5.0;
/// Playback keeps running this long after the last line.
const OUTRO_SECS: f64 = 3.0;

/// Options for one simulated playback run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub start: f64,
    pub speed: f64,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            start: 0.0,
            speed: 1.0,
        }
    }
}

/// Last thing printed, so output only changes when the display does.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shown {
    Hidden,
    Plain,
    Synced(Option<usize>),
}

pub struct App<P, W> {
    cfg: Config,
    pref: P,
    sync: Synchronizer,
    clock: PlaybackClock,
    synced: bool,
    end_secs: f64,
    shown: Option<Shown>,
    should_quit: bool,
    out: W,
}

impl<P: ModePreference, W: Write> App<P, W> {
    pub fn new(
        cfg: Config,
        pref: P,
        lyrics: Lyrics,
        opts: PlayOptions,
        now: Instant,
        out: W,
    ) -> Self {
        let mut sync = Synchronizer::new(prefs::restore(&pref));
        let end_secs = lyrics
            .lines
            .iter()
            .map(|l| l.time)
            .fold(0.0_f64, f64::max)
            + OUTRO_SECS;
        sync.load(lyrics.lines);

        // Unsynced lyrics can't highlight; show them plain without touching
        // the stored preference.
        if !lyrics.synced && sync.mode() == DisplayMode::Synced {
            sync.set_mode(DisplayMode::Plain);
        }

        Self {
            cfg,
            pref,
            sync,
            clock: PlaybackClock::new(opts.start, opts.speed, now),
            synced: lyrics.synced,
            end_secs,
            shown: None,
            should_quit: false,
            out,
        }
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.sync
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());
        player::spawn_ticker(tx, Duration::from_millis(self.cfg.player.tick_ms.max(10)));

        tracing::info!(
            lines = self.sync.lines().len(),
            mode = %self.sync.mode(),
            "playback started"
        );
        self.tick(Instant::now())?;

        while let Some(ev) = rx.recv().await {
            self.handle_event(ev, Instant::now())?;
            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, ev: Event, now: Instant) -> anyhow::Result<()> {
        match ev {
            Event::Player(PlayerEvent::Tick) => self.tick(now),
            Event::Input(InputEvent::Line(line)) => match input::map_input_to_action(&line) {
                Some(action) => self.handle_action(action, now),
                None => {
                    writeln!(self.out, "? unknown command: {}", line.trim())?;
                    Ok(())
                }
            },
            Event::Input(InputEvent::Closed) => {
                tracing::debug!("stdin closed, playback continues");
                Ok(())
            }
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> anyhow::Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::TogglePause => {
                self.clock.toggle_pause(now);
                let state = if self.clock.is_paused() { "paused" } else { "resumed" };
                writeln!(self.out, "-- {state} at {}", format_timestamp(self.clock.position_at(now)))?;
            }
            Action::SeekTo(secs) => self.clock.seek(secs, now),
            Action::SeekForward => {
                let pos = self.clock.position_at(now);
                self.clock.seek(pos + SEEK_STEP_SECS, now);
            }
            Action::SeekBack => {
                let pos = self.clock.position_at(now);
                self.clock.seek(pos - SEEK_STEP_SECS, now);
            }
            Action::SetMode(mode) => self.change_mode(mode),
            Action::CycleMode => {
                let mut next = self.sync.mode().next();
                if next == DisplayMode::Synced && !self.synced {
                    next = next.next();
                }
                self.change_mode(next);
            }
        }
        self.tick(now)
    }

    fn change_mode(&mut self, mode: DisplayMode) {
        if mode == DisplayMode::Synced && !self.synced {
            tracing::warn!("lyrics are not synced, staying in {}", self.sync.mode());
            return;
        }
        let mode = self.sync.set_mode(mode);
        if let Err(e) = self.pref.store(mode) {
            tracing::warn!("failed to save lyrics mode: {e:#}");
        }
    }

    fn tick(&mut self, now: Instant) -> anyhow::Result<()> {
        let position = self.clock.position_at(now);
        self.sync.advance(position)?;
        self.render()?;

        // Plain lyrics carry no timing to tell where the song ends.
        if self.synced && position >= self.end_secs {
            writeln!(self.out, "-- end of lyrics")?;
            self.should_quit = true;
        }
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let shown = match self.sync.view() {
            LyricsView::Hidden => Shown::Hidden,
            LyricsView::Plain(_) => Shown::Plain,
            LyricsView::Synced { active, .. } => Shown::Synced(active),
        };
        if self.shown == Some(shown) {
            return Ok(());
        }
        self.shown = Some(shown);

        match self.sync.view() {
            LyricsView::Hidden => writeln!(self.out, "-- lyrics hidden")?,
            LyricsView::Plain(lines) => {
                writeln!(self.out, "-- lyrics")?;
                for line in lines {
                    writeln!(self.out, "   {}", line.text)?;
                }
            }
            LyricsView::Synced { lines, active } => {
                if lines.is_empty() {
                    writeln!(self.out, "-- no lyrics available")?;
                    return Ok(());
                }
                let window = self
                    .sync
                    .window(self.cfg.lyrics.context_before, self.cfg.lyrics.context_after);
                writeln!(self.out)?;
                for i in window {
                    let line = &lines[i];
                    let prefix = if Some(i) == active { "♪ " } else { "  " };
                    writeln!(self.out, "{prefix}{} {}", format_timestamp(line.time), line.text)?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics;
    use crate::prefs::MemoryPreference;

    const LRC: &str = "[00:01.00]one\n[00:03.00]two\n[00:05.00]three";

    fn app(pref: MemoryPreference, raw: &str, synced: bool, t0: Instant) -> App<MemoryPreference, Vec<u8>> {
        let lyrics = if synced {
            Lyrics::from_sources(Some(raw), None).unwrap()
        } else {
            Lyrics::from_sources(None, Some(raw)).unwrap()
        };
        App::new(Config::default(), pref, lyrics, PlayOptions::default(), t0, Vec::new())
    }

    fn output(app: &App<MemoryPreference, Vec<u8>>) -> String {
        String::from_utf8(app.out.clone()).unwrap()
    }

    fn tick(app: &mut App<MemoryPreference, Vec<u8>>, at: Instant) {
        app.handle_event(Event::Player(PlayerEvent::Tick), at).unwrap();
    }

    #[test]
    fn test_ticks_follow_the_clock() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);

        tick(&mut app, t0);
        assert_eq!(app.synchronizer().active(), None);
        tick(&mut app, t0 + Duration::from_millis(3200));
        assert_eq!(app.synchronizer().active(), Some(1));

        let out = output(&app);
        assert!(out.contains("♪ [00:03.00] two"));
        assert!(out.contains("  [00:05.00] three"));
    }

    #[test]
    fn test_unchanged_display_is_not_reprinted() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);

        tick(&mut app, t0 + Duration::from_millis(1100));
        let once = output(&app);
        tick(&mut app, t0 + Duration::from_millis(1300));
        assert_eq!(output(&app), once);
    }

    #[test]
    fn test_seek_and_quit() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);

        app.handle_event(Event::Input(InputEvent::Line("s 5".into())), t0).unwrap();
        assert_eq!(app.synchronizer().active(), Some(2));
        app.handle_event(Event::Input(InputEvent::Line("b".into())), t0).unwrap();
        assert_eq!(app.synchronizer().active(), None);

        app.handle_event(Event::Input(InputEvent::Line("q".into())), t0).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_mode_change_is_persisted() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);

        app.handle_action(Action::SetMode(DisplayMode::Hidden), t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(app.synchronizer().active(), None);
        assert_eq!(app.pref.load().unwrap(), Some(DisplayMode::Hidden));
        assert!(output(&app).contains("-- lyrics hidden"));

        app.handle_action(Action::SetMode(DisplayMode::Synced), t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(app.synchronizer().active(), Some(0));
    }

    #[test]
    fn test_stored_mode_is_restored() {
        let t0 = Instant::now();
        let app = app(MemoryPreference::new(Some(DisplayMode::Plain)), LRC, true, t0);
        assert_eq!(app.synchronizer().mode(), DisplayMode::Plain);
    }

    #[test]
    fn test_plain_lyrics_never_switch_to_synced() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), "one\ntwo", false, t0);
        assert_eq!(app.synchronizer().mode(), DisplayMode::Plain);
        assert_eq!(app.pref.load().unwrap(), None);

        app.handle_action(Action::SetMode(DisplayMode::Synced), t0).unwrap();
        assert_eq!(app.synchronizer().mode(), DisplayMode::Plain);
        assert!(output(&app).contains("   two"));
    }

    #[test]
    fn test_playback_ends_after_last_line() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);
        tick(&mut app, t0 + Duration::from_secs(9));
        assert!(app.should_quit());
        assert!(output(&app).contains("-- end of lyrics"));
    }

    #[test]
    fn test_plain_lyrics_cycle_skips_synced() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), "one\ntwo", false, t0);

        app.handle_action(Action::CycleMode, t0).unwrap();
        assert_eq!(app.synchronizer().mode(), DisplayMode::Hidden);
        app.handle_action(Action::CycleMode, t0).unwrap();
        assert_eq!(app.synchronizer().mode(), DisplayMode::Plain);
        assert_eq!(app.pref.load().unwrap(), Some(DisplayMode::Plain));
    }

    #[test]
    fn test_plain_lyrics_keep_playing() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), "one\ntwo", false, t0);
        tick(&mut app, t0 + Duration::from_secs(60));
        assert!(!app.should_quit());
        assert!(!output(&app).contains("-- end of lyrics"));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let t0 = Instant::now();
        let mut app = app(MemoryPreference::default(), LRC, true, t0);
        app.handle_event(Event::Input(InputEvent::Line("dance".into())), t0).unwrap();
        assert!(output(&app).contains("unknown command: dance"));
        assert!(!app.should_quit());

        // parsed lines stay untouched by display commands
        assert_eq!(app.synchronizer().lines(), lyrics::parse(LRC).as_slice());
    }
}
