//! LRC format parser
//!
//! Parses synchronized lyrics in LRC format:
//! [mm:ss.xx] Lyrics line here
//!
//! Example:
//! [00:12.34] Hello world
//! [00:15.000] Another line
//!
//! Parsing is best effort. Lines without a timestamp tag (metadata such as
//! `[ti:Title]`, blank padding, stray text) are dropped instead of failing, so
//! the worst case for garbage input is an empty result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{2}):([0-9]{2})\.([0-9]{2,3})\]").expect("timestamp pattern is valid")
});

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds from the start of the track
    pub time: f64,
    /// The lyrics text, never empty
    pub text: String,
}

impl LyricLine {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// Parse LRC formatted lyrics into timed lines.
///
/// The first `[mm:ss.xx]` / `[mm:ss.xxx]` tag found anywhere in a physical line
/// gives its time; the rest of the line, trimmed, is the text. Output keeps
/// the order of the input, out-of-order timestamps included.
pub fn parse(content: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    let mut dropped = 0usize;

    for raw in content.lines() {
        match parse_timed_line(raw) {
            Some(line) => lines.push(line),
            None => dropped += 1,
        }
    }

    tracing::debug!(parsed = lines.len(), dropped, "parsed lrc lyrics");
    lines
}

/// Parse plain (unsynchronized) lyrics. Every non-blank line becomes a
/// [`LyricLine`] at time zero.
pub fn parse_plain(content: &str) -> Vec<LyricLine> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| LyricLine::new(0.0, l))
        .collect()
}

/// Whether any line of `content` carries an LRC timestamp tag.
pub fn looks_like_lrc(content: &str) -> bool {
    content.lines().any(|l| TIMESTAMP.is_match(l))
}

/// Render seconds as an LRC tag, e.g. `[01:02.50]`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let centis = (seconds * 100.0).round() as u64;
    let min = centis / 6000;
    let sec = (centis / 100) % 60;
    let frac = centis % 100;
    format!("[{min:02}:{sec:02}.{frac:02}]")
}

fn parse_timed_line(line: &str) -> Option<LyricLine> {
    let caps = TIMESTAMP.captures(line)?;
    let tag = caps.get(0)?;
    let time = parse_timestamp(&caps[1], &caps[2], &caps[3])?;

    let text = format!("{}{}", &line[..tag.start()], &line[tag.end()..]);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(LyricLine::new(time, text))
}

/// Convert the captured `mm`, `ss` and fraction groups to seconds.
/// The fraction is hundredths for two digits and thousandths for three.
fn parse_timestamp(min: &str, sec: &str, frac: &str) -> Option<f64> {
    let min: u32 = min.parse().ok()?;
    let sec: u32 = sec.parse().ok()?;
    let frac_val: u32 = frac.parse().ok()?;
    let scale = 10u32.pow(frac.len() as u32);

    Some(f64::from(min) * 60.0 + f64::from(sec) + f64::from(frac_val) / f64::from(scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_single_line() {
        assert_eq!(parse("[00:01.50]hello"), vec![LyricLine::new(1.5, "hello")]);
    }

    #[test]
    fn test_parse_two_and_three_digit_fractions() {
        let lines = parse("[00:01.500]hello\n[00:02.25]world");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].time, 1.5);
        assert_eq!(lines[0].text, "hello");
        assert_eq!(lines[1].time, 2.25);
        assert_eq!(lines[1].text, "world");
    }

    #[test]
    fn test_parse_drops_blank_and_untagged_lines() {
        assert!(parse("[00:00.00]   \nno tag here").is_empty());
    }

    #[test]
    fn test_parse_lrc() {
        let lrc = r#"
[ti:Test Song]
[ar:Test Artist]
[00:12.34]First line
[01:15.00]  Second line
"#;
        let lines = parse(lrc);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].time, 12.34);
        assert_eq!(lines[0].text, "First line");
        assert_eq!(lines[1].time, 75.0);
        assert_eq!(lines[1].text, "Second line");
    }

    #[test]
    fn test_tag_found_after_prefix() {
        let lines = parse("v1: [00:03.10] after prefix");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].time, 3.1);
        assert_eq!(lines[0].text, "v1:  after prefix");
    }

    #[test]
    fn test_only_first_tag_is_stripped() {
        let lines = parse("[00:01.00][00:05.00]chorus");
        assert_eq!(lines, vec![LyricLine::new(1.0, "[00:05.00]chorus")]);
    }

    #[test]
    fn test_out_of_order_is_preserved() {
        let lines = parse("[00:09.00]late\n[00:01.00]early");
        assert_eq!(lines[0].text, "late");
        assert_eq!(lines[1].text, "early");
    }

    #[test]
    fn test_malformed_tags_are_dropped() {
        assert!(parse("[0:01.00]one digit minute\n[00:01.0]short frac\n[00:01.0000]long").is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let lines = parse("[00:01.00]one\r\n[00:02.00]two\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "two");
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_tag() {
        let lines = parse("[٠٠:٠١.٠٠] [00:02.00]real line");
        assert_eq!(lines, vec![LyricLine::new(2.0, "[٠٠:٠١.٠٠] real line")]);
        assert!(parse("[００:０１.００]fullwidth").is_empty());
        assert!(!looks_like_lrc("[٠٠:٠١.٠٠]x"));
    }

    #[test]
    fn test_parse_plain() {
        let lines = parse_plain("  first \n\n second\n");
        assert_eq!(lines, vec![LyricLine::new(0.0, "first"), LyricLine::new(0.0, "second")]);
    }

    #[test]
    fn test_looks_like_lrc() {
        assert!(!looks_like_lrc("This is plain text\nNo timestamps at all"));
        assert!(looks_like_lrc("[ar:Someone]\n[00:12.34]This is a line"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "[00:00.00]");
        assert_eq!(format_timestamp(62.5), "[01:02.50]");
        assert_eq!(format_timestamp(-3.0), "[00:00.00]");
        assert_eq!(format_timestamp(f64::NAN), "[00:00.00]");
    }
}
