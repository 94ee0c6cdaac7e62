//! Lepegeto - console game and results viewer.

#![warn(missing_docs)]

mod cli;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use lepegeto::{AppConfig, Console, GameSession, PlayerNames, ResultRepository, load_game};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play {
            blue,
            red,
            db_path,
            no_record,
            load,
        } => run_play(config, blue, red, db_path, no_record, load),
        Command::Scores {
            db_path,
            player,
            limit,
        } => run_scores(config, db_path, player, limit),
    }
}

/// Asks for a name on stdin, offering `default` when given.
fn ask_name(label: &str, default: Option<&str>) -> Result<String> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        match default {
            Some(name) => write!(stdout, "{label} player name [{name}]: ")?,
            None => write!(stdout, "{label} player name: ")?,
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("No name given for {label}");
        }
        let name = line.trim();
        match (name.is_empty(), default) {
            (false, _) => return Ok(name.to_string()),
            (true, Some(fallback)) => return Ok(fallback.to_string()),
            (true, None) => writeln!(stdout, "Please enter a name")?,
        }
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(
    config: AppConfig,
    blue: Option<String>,
    red: Option<String>,
    db_path: Option<String>,
    no_record: bool,
    load: Option<std::path::PathBuf>,
) -> Result<()> {
    let config = match db_path {
        Some(path) => config.with_db_path(path),
        None => config,
    };

    let results = if no_record {
        None
    } else {
        Some(
            ResultRepository::open(config.db_path())
                .with_context(|| format!("opening results store {}", config.db_path()))?,
        )
    };

    let saved = load
        .map(|path| {
            let path = config.save_path(path);
            load_game(&path).with_context(|| format!("loading {}", path.display()))
        })
        .transpose()?;

    let names = match &saved {
        Some(game) => game.names.clone(),
        None => {
            let blue = match blue {
                Some(name) => name,
                None => ask_name("Blue", config.default_blue().as_deref())?,
            };
            let red = match red {
                Some(name) => name,
                None => ask_name("Red", config.default_red().as_deref())?,
            };
            PlayerNames::new(blue, red)?
        }
    };

    let mut session = GameSession::new(names, results);
    if let Some(game) = saved {
        session.restore(game);
    }

    info!("Starting console game");
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout(), session, config);
    console.run()?;
    Ok(())
}

/// Print recorded results
#[instrument(skip(config))]
fn run_scores(
    config: AppConfig,
    db_path: Option<String>,
    player: Option<String>,
    limit: usize,
) -> Result<()> {
    let db_path = db_path.unwrap_or_else(|| config.db_path().clone());
    let repository = ResultRepository::open(&db_path)
        .with_context(|| format!("opening results store {db_path}"))?;

    let rows = match &player {
        Some(name) => {
            let record = repository.player_record(name)?;
            println!(
                "{name}: {} games, {} wins, {} losses ({:.1}%)",
                record.games(),
                record.wins(),
                record.losses(),
                record.win_rate()
            );
            repository.results_for_player(name)?
        }
        None => repository.list_results()?,
    };

    if rows.is_empty() {
        println!("No games recorded yet");
        return Ok(());
    }
    println!("{:>5}  {:<16} {:<16} {:<16} {}", "Steps", "Winner", "Blue", "Red", "Played");
    for row in rows.iter().take(limit) {
        println!(
            "{:>5}  {:<16} {:<16} {:<16} {}",
            row.steps(),
            row.winner(),
            row.player1(),
            row.player2(),
            row.created().format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
