use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::lyrics::DisplayMode;
use std::io::BufRead;
use tokio::sync::mpsc;

/// Forward stdin lines into the app loop. Runs on a plain thread so a pending
/// read never holds up runtime shutdown.
pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(Event::Input(InputEvent::Line(line))).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!("stdin read failed: {e}");
                    return;
                }
            }
        }
        let _ = tx.blocking_send(Event::Input(InputEvent::Closed));
    });
}

/// Map a typed command to an action.
///
/// `q` quit, `p` pause, `f`/`b` seek 5s, `s <secs>` seek, `m` cycle mode,
/// `m <hidden|plain|synced>` set mode.
pub fn map_input_to_action(line: &str) -> Option<Action> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?;
    let arg = words.next();

    match (cmd, arg) {
        ("q" | "quit", _) => Some(Action::Quit),
        ("p" | "pause", _) => Some(Action::TogglePause),
        ("f" | "forward", _) => Some(Action::SeekForward),
        ("b" | "back", _) => Some(Action::SeekBack),
        ("s" | "seek", Some(secs)) => parse_seconds(secs).map(Action::SeekTo),
        ("m" | "mode", None) => Some(Action::CycleMode),
        ("m" | "mode", Some(name)) => name.parse::<DisplayMode>().ok().map(Action::SetMode),
        _ => None,
    }
}

/// Seconds as `75`, `75.5` or `1:15`.
fn parse_seconds(s: &str) -> Option<f64> {
    let secs = match s.split_once(':') {
        Some((m, rest)) => m.parse::<u32>().ok().map(f64::from)? * 60.0 + rest.parse::<f64>().ok()?,
        None => s.parse::<f64>().ok()?,
    };
    secs.is_finite().then_some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(map_input_to_action("q"), Some(Action::Quit));
        assert_eq!(map_input_to_action("  pause "), Some(Action::TogglePause));
        assert_eq!(map_input_to_action("f"), Some(Action::SeekForward));
        assert_eq!(map_input_to_action("seek 1:15"), Some(Action::SeekTo(75.0)));
        assert_eq!(map_input_to_action("s 12.5"), Some(Action::SeekTo(12.5)));
        assert_eq!(map_input_to_action("m"), Some(Action::CycleMode));
        assert_eq!(map_input_to_action("mode hidden"), Some(Action::SetMode(DisplayMode::Hidden)));
    }

    #[test]
    fn test_unknown_or_incomplete() {
        assert_eq!(map_input_to_action(""), None);
        assert_eq!(map_input_to_action("dance"), None);
        assert_eq!(map_input_to_action("seek"), None);
        assert_eq!(map_input_to_action("seek soon"), None);
        assert_eq!(map_input_to_action("seek NaN"), None);
        assert_eq!(map_input_to_action("mode karaoke"), None);
    }
}
