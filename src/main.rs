use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use frametree::command::run_line;
use frametree::config::Config;
use frametree::EditorSession;

fn main() {
    // Handle --print-default-config before any other initialization
    if std::env::args().any(|a| a == "--print-default-config") {
        print!("{}", Config::print_default());
        return;
    }

    env_logger::init();
    log::info!("frametree v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("Application error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Config path from the first argument, else ~/.config/frametree/config.toml
    let config_path = match std::env::args().nth(1) {
        Some(arg) if arg.starts_with("--") => anyhow::bail!("unknown option {arg}"),
        Some(arg) => {
            let path = PathBuf::from(arg);
            if !path.exists() {
                log::warn!("Config file {} does not exist", path.display());
            }
            path
        }
        None => default_config_path(),
    };
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            log::info!("Config loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("Config load error ({}), using defaults", e);
            Config::default()
        }
    };

    let mut session = EditorSession::from_config("<stdin>", &config);
    log::info!(
        "Session {} started with frame {}",
        session.path(),
        session.frames().active_id()
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        if let Some(reply) = run_line(&line, session.frames_mut()) {
            writeln!(stdout, "{reply}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}

/// Get the config file path (~/.config/frametree/config.toml).
fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    home.join(".config").join("frametree").join("config.toml")
}
