use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use lyricsync::app::{App, PlayOptions};
use lyricsync::config;
use lyricsync::lyrics::{self, DiffKind, DiffStats, DisplayMode, Lyrics};
use lyricsync::prefs::{self, ConfigPreference, ModePreference};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lyricsync", version, about = "Synchronized lyrics toolkit")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an LRC file and print its timed lines.
    Parse {
        file: PathBuf,
        /// Print lines as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Diff a lyric suggestion against the canonical text.
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Print segments as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Play lyrics against a simulated clock. Type `q`, `p`, `f`, `b`,
    /// `s <secs>` or `m [mode]` while it runs. Synced lyrics stop a few
    /// seconds after the last line; plain lyrics run until `q`.
    Play {
        file: PathBuf,
        /// Plain lyrics used when the file has no timed lines.
        #[arg(long)]
        plain: Option<PathBuf>,
        /// Start position in seconds.
        #[arg(long, default_value_t = 0.0)]
        start: f64,
        /// Playback speed multiplier.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Show or set the lyrics display mode (hidden, plain, synced).
    Mode { mode: Option<DisplayMode> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    match cli.command {
        Command::Parse { file, json } => {
            let raw = read(&file)?;
            let lines = lyrics::parse(&raw);
            if json {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            } else {
                for line in &lines {
                    println!("{} {}", lyrics::format_timestamp(line.time), line.text);
                }
            }
        }
        Command::Diff { old, new, json } => {
            let old = read(&old)?;
            let new = read(&new)?;
            let segments = lyrics::diff(Some(&old), Some(&new));
            if json {
                println!("{}", serde_json::to_string_pretty(&segments)?);
            } else {
                for seg in &segments {
                    for line in &seg.lines {
                        match seg.kind {
                            DiffKind::Unchanged => println!("  {line}"),
                            DiffKind::Added => println!("{}", format!("+ {line}").green()),
                            DiffKind::Removed => println!("{}", format!("- {line}").red()),
                        }
                    }
                }
                let stats = DiffStats::of(&segments);
                if stats.is_identical() {
                    println!("no changes");
                } else {
                    println!(
                        "{} added, {} removed, {} unchanged",
                        stats.added, stats.removed, stats.unchanged
                    );
                }
            }
        }
        Command::Play {
            file,
            plain,
            start,
            speed,
        } => {
            let raw = read(&file)?;
            let extra = plain.as_deref().map(read).transpose()?;
            let (synced, plain) = if lyrics::looks_like_lrc(&raw) {
                (Some(raw.as_str()), extra.as_deref())
            } else {
                (None, Some(raw.as_str()))
            };
            let lyrics = Lyrics::from_sources(synced, plain)
                .with_context(|| format!("no lyrics in {}", file.display()))?;

            let pref = ConfigPreference::new(cfg.clone(), cfg_path);
            let mut app = App::new(
                cfg,
                pref,
                lyrics,
                PlayOptions { start, speed },
                std::time::Instant::now(),
                std::io::stdout(),
            );
            app.run().await?;
        }
        Command::Mode { mode } => {
            let mut pref = ConfigPreference::new(cfg, cfg_path);
            match mode {
                Some(mode) => {
                    pref.store(mode).context("save lyrics mode")?;
                    println!("Lyrics mode set to {mode}.");
                }
                None => println!("{}", prefs::restore(&pref)),
            }
        }
    }

    Ok(())
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
