use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use smartdesk_core::{
    clock::{tick_labels, value_to_angle, ClockSelection, PickMode},
    command::{Interpreter, Outcome},
    config::{ClockConfig, Config},
    host::{MemoryStore, NoticeLevel},
};
use tokio::io::{AsyncBufReadExt, BufReader};

mod log;

/// Drives the smart desktop command interpreter from the terminal, against an
/// in-memory dashboard.
#[derive(Debug, Parser)]
#[command(name = "smartdesk", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "SMARTDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Print the dashboard's widgets as JSON after the last command.
    #[arg(long)]
    dump: bool,

    /// Commands such as "set an alarm at 7am" or "expense of 12 under lunch".
    /// Read from stdin, one per line, when none are given.
    commands: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the layout of the clock picker face.
    Face {
        #[arg(long, value_enum, default_value_t = FaceMode::Hour)]
        mode: FaceMode,
        /// Value to mark and point the hand at.
        #[arg(long)]
        value: Option<u8>,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum FaceMode {
    Hour,
    Minute,
}

impl From<FaceMode> for PickMode {
    fn from(mode: FaceMode) -> Self {
        match mode {
            FaceMode::Hour => PickMode::Hour,
            FaceMode::Minute => PickMode::Minute,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    log::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Some(Command::Face { mode, value }) => print_face(&config.clock, mode.into(), value),
        None => run_commands(config, cli.dump, cli.commands).await,
    }
}

async fn run_commands(config: Config, dump: bool, commands: Vec<String>) -> anyhow::Result<()> {
    let mut interpreter = Interpreter::new(config.interpreter);
    let mut store = MemoryStore::new();

    if commands.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            run_one(&mut interpreter, &mut store, &line).await?;
        }
    } else {
        for command in &commands {
            run_one(&mut interpreter, &mut store, command).await?;
        }
    }

    if dump {
        let widgets = store.into_widgets();
        println!("{}", serde_json::to_string_pretty(&widgets)?);
    }
    Ok(())
}

async fn run_one(
    interpreter: &mut Interpreter,
    store: &mut MemoryStore,
    command: &str,
) -> anyhow::Result<()> {
    let command = command.trim();
    if command.is_empty() {
        return Ok(());
    }

    let outcome = interpreter.run(command, store).await?;
    if outcome == Outcome::Ignored {
        tracing::info!(command, "no command recognized");
    }
    for notice in store.drain_notices() {
        match notice.level {
            NoticeLevel::Success => println!("ok: {}", notice.message),
            NoticeLevel::Error => println!("error: {}", notice.message),
        }
    }
    Ok(())
}

fn print_face(config: &ClockConfig, mode: PickMode, value: Option<u8>) -> anyhow::Result<()> {
    let selection = value.map(|value| ClockSelection::new(mode, value)).transpose()?;

    for label in tick_labels(mode, config.label_radius_percent) {
        let marker = if selection.is_some_and(|s| s.value() == label.value) { "*" } else { " " };
        println!("{marker}{} at ({:.1}%, {:.1}%)", label.text, label.x_percent, label.y_percent);
    }
    if let Some(selection) = selection {
        println!(
            "hand at {:.1} degrees, {}% long",
            value_to_angle(selection.value(), mode),
            mode.hand_length_percent()
        );
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commands_run_without_a_subcommand() {
        let cli =
            Cli::try_parse_from(["smartdesk", "--dump", "alarm at 7am", "todo buy milk"]).unwrap();
        assert!(cli.dump);
        assert_eq!(cli.commands, vec!["alarm at 7am", "todo buy milk"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, None);
    }

    #[test]
    fn no_commands_means_stdin() {
        let cli = Cli::try_parse_from(["smartdesk", "--config", "desk.toml"]).unwrap();
        assert!(!cli.dump);
        assert!(cli.commands.is_empty());
        assert_eq!(cli.config, Some(PathBuf::from("desk.toml")));
    }

    #[test]
    fn face_subcommand() {
        let cli = Cli::try_parse_from(["smartdesk", "face", "--mode", "minute", "--value", "15"])
            .unwrap();
        assert!(cli.commands.is_empty());
        match cli.command {
            Some(Command::Face { mode: FaceMode::Minute, value: Some(15) }) => {}
            other => panic!("unexpected subcommand: {other:?}"),
        }

        let cli = Cli::try_parse_from(["smartdesk", "face"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Face { mode: FaceMode::Hour, value: None })));
    }

    #[test]
    fn face_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["smartdesk", "face", "--mode", "second"]).is_err());
    }
}
