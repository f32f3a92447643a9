//! `caret` command line: replays gesture scripts and runs one-off hit tests.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_config::{Config, load_from};
use core_layout::{
    MonospaceMeasurer, TextMeasurementPort, TextStyle, line_at, locate, px_to_units,
};
use core_ui::DEFAULT_CELL_PX;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod replay;
mod script;

use script::Script;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "caret", version, about = "Text selection engine driver")]
struct Args {
    /// Configuration file (overrides discovery of `caret.toml`).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script and print the resulting selections.
    Replay {
        script: PathBuf,
        /// Playback speed multiplier.
        #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
        speed: f64,
    },
    /// Hit test one point against monospace-measured text.
    Locate {
        text: String,
        x: f32,
        y: f32,
        /// Wrap width in pixels.
        #[arg(long)]
        width: Option<f32>,
    },
}

fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err("speed must be a positive number".to_string())
    }
}

fn configure_logging(config: &Config) -> Option<WorkerGuard> {
    let target = Path::new(&config.file.logging.file);
    let log_dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = target.file_name()?;
    let log_path = log_dir.join(file_name);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.file.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// `offset=.. trailing=.. caret=.. line=..` for a point, or `miss`.
fn locate_line(config: &Config, text: &str, x: f32, y: f32, width: Option<f32>) -> String {
    let measurer = MonospaceMeasurer::new(DEFAULT_CELL_PX * config.dpi_scale());
    let layout = measurer.measure(text, width.map(px_to_units), &TextStyle::default());
    let (x, y) = (px_to_units(x), px_to_units(y));
    match locate(&measurer, &layout, x, y) {
        Some(hit) => {
            let line = line_at(&measurer, &layout, y)
                .map_or_else(|| "-".to_string(), |l| l.to_string());
            format!(
                "offset={} trailing={} caret={} line={line}",
                hit.offset,
                hit.trailing,
                hit.caret()
            )
        }
        None => "miss".to_string(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let _log_guard = configure_logging(&config);
    install_panic_hook();
    info!(
        target: "runtime",
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        dpi_scale = config.dpi_scale(),
        "startup"
    );

    match args.command {
        Command::Replay { script, speed } => {
            let parsed = Script::read(&script)
                .with_context(|| format!("loading {}", script.display()))?;
            let report = replay::replay(&parsed, &config, speed).await?;
            println!("{report}");
        }
        Command::Locate { text, x, y, width } => {
            println!("{}", locate_line(&config, &text, x, y, width));
        }
    }
    info!(target: "runtime", "shutdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn args_parse_replay() {
        let args = Args::try_parse_from(["caret", "replay", "drag.toml", "--speed", "4"]).unwrap();
        let Command::Replay { script, speed } = args.command else {
            panic!("expected replay");
        };
        assert_eq!(script, PathBuf::from("drag.toml"));
        assert_eq!(speed, 4.0);
        assert!(args.config.is_none());
    }

    #[test]
    fn speed_must_be_positive() {
        assert!(Args::try_parse_from(["caret", "replay", "a.toml", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["caret", "replay", "a.toml", "--speed", "fast"]).is_err());
    }

    #[test]
    fn args_parse_locate_with_global_config() {
        let args = Args::try_parse_from([
            "caret", "locate", "hello", "13", "5", "--width", "40", "--config", "c.toml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(args.command, Command::Locate { width: Some(w), .. } if w == 40.0));
    }

    #[test]
    fn locate_prints_hit() {
        let config = Config::default();
        // 8px cells; x=13 is in the right half of 'e'
        assert_eq!(
            locate_line(&config, "hello", 13.0, 5.0, None),
            "offset=1 trailing=1 caret=2 line=0"
        );
        // wraps after five cells at 40px
        assert_eq!(
            locate_line(&config, "helloworld", 1.0, 25.0, Some(40.0)),
            "offset=5 trailing=0 caret=5 line=1"
        );
        assert_eq!(
            locate_line(&config, "hi", 0.0, 500.0, None),
            "offset=2 trailing=0 caret=2 line=-"
        );
    }
}
