use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dialquest::{
    replay::{self, OUTPUT_HEADER},
    DialConfig, GameSession,
};

#[derive(Debug, Parser)]
#[command(name = "dial_replay")]
#[command(about = "Replay a recorded dial trace through the game session")]
struct Cli {
    /// Trace CSV (`pointer,<ms>,<down|move|up>,<x>,<y>` / `key,<ms>,<backspace|clear>`).
    trace: PathBuf,
    /// Session config; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Expected command labels, one per line.
    #[arg(long)]
    expect: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DialConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DialConfig::default(),
    };

    let records = replay::parse_trace(&cli.trace)?;
    let mut session = GameSession::new(config.session_config(), config.assets());
    let lines = replay::run(&mut session, &records);

    println!("{OUTPUT_HEADER}");
    for line in &lines {
        println!("{line}");
    }

    if let Some(expect) = &cli.expect {
        let expected = replay::parse_expected_labels(expect)?;
        replay::compare_labels(&expected, &lines)?;
        log::info!("replay: {} commands match {}", lines.len(), expect.display());
    }

    Ok(())
}
