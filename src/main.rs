#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod error;
mod loader;
mod notify;
#[cfg(target_os = "windows")]
mod overlay;
mod pixels;
mod placement;
mod resize;

use std::path::PathBuf;

use config::{load_config, Config};
use error::OverlayResult;

fn main() {
    init_logging();

    let mut config = load_config();
    if let Some(path) = parse_args() {
        config.image_path = path;
    }

    let code = match run(&config) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            notify::notify_error(&e.to_string());
            e.exit_code()
        }
    };
    std::process::exit(code);
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum ArgAction {
    /// Run, optionally overriding the configured image path.
    Run(Option<PathBuf>),
    /// `--help`: print usage and exit cleanly.
    Help,
    /// Anything else is misuse: print usage and exit nonzero.
    Misuse,
}

fn classify_args(args: &[std::ffi::OsString]) -> ArgAction {
    match args {
        [] => ArgAction::Run(None),
        [help] if help == "--help" => ArgAction::Help,
        [path] => ArgAction::Run(Some(PathBuf::from(path))),
        _ => ArgAction::Misuse,
    }
}

/// Single optional positional argument overriding the configured image path.
fn parse_args() -> Option<PathBuf> {
    let args = std::env::args_os().skip(1).collect::<Vec<_>>();
    match classify_args(&args) {
        ArgAction::Run(path) => path,
        ArgAction::Help => {
            println!("usage: desk-overlay [image-path]");
            std::process::exit(0);
        }
        ArgAction::Misuse => {
            eprintln!("usage: desk-overlay [image-path]");
            std::process::exit(2);
        }
    }
}

fn init_logging() {
    use simplelog::{
        ColorChoice, CombinedLogger, Config as LogConfig, LevelFilter, SharedLogger, TermLogger,
        TerminalMode, WriteLogger,
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Ok(file) = std::fs::File::create(config::get_log_path()) {
        loggers.push(WriteLogger::new(LevelFilter::Debug, LogConfig::default(), file));
    }
    let _ = CombinedLogger::init(loggers);
}

/// The whole pipeline runs to completion on the startup path; once the
/// surface is shown only the host's destroy notification remains.
#[cfg(target_os = "windows")]
fn run(config: &Config) -> OverlayResult<i32> {
    let session = overlay::GdiSession::init()?;

    let image = loader::load(&config.image_path)?;
    let scaled = resize::resize(&image, config.scale_factor)?;
    drop(image);

    let (x, y) = placement::anchored_origin(
        config.anchor,
        session.screen_size(),
        (scaled.width(), scaled.height()),
        config.vertical_offset,
    );
    log::info!(
        "anchoring {}x{} overlay at ({}, {})",
        scaled.width(),
        scaled.height(),
        x,
        y
    );

    let hwnd = overlay::create_overlay_window(x, y, scaled.width(), scaled.height())?;
    overlay::show(hwnd);
    overlay::present(hwnd, &scaled, x, y)?;

    Ok(overlay::run_message_loop())
}

#[cfg(not(target_os = "windows"))]
fn run(config: &Config) -> OverlayResult<i32> {
    // Still validate the pipeline so users get a real diagnostic for a bad
    // image or scale factor, then bail at the presentation step.
    let image = loader::load(&config.image_path)?;
    let scaled = resize::resize(&image, config.scale_factor)?;
    log::info!(
        "processed {}x{} image, but presentation needs a Windows compositor",
        scaled.width(),
        scaled.height()
    );
    Err(error::OverlayError::Init(
        "layered desktop overlays are only available on Windows".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(raw: &[&str]) -> Vec<OsString> {
        raw.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_no_args_runs_with_configured_path() {
        assert_eq!(classify_args(&args(&[])), ArgAction::Run(None));
    }

    #[test]
    fn test_single_path_overrides() {
        assert_eq!(
            classify_args(&args(&["pin.png"])),
            ArgAction::Run(Some(PathBuf::from("pin.png")))
        );
    }

    #[test]
    fn test_help_is_not_misuse() {
        assert_eq!(classify_args(&args(&["--help"])), ArgAction::Help);
    }

    #[test]
    fn test_extra_args_are_misuse() {
        assert_eq!(classify_args(&args(&["a.png", "b.png"])), ArgAction::Misuse);
        assert_eq!(classify_args(&args(&["--help", "x"])), ArgAction::Misuse);
    }
}
