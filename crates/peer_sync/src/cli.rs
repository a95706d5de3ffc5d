//! Command-line interface for peer_sync.

use clap::{Parser, Subcommand};
use peer_tictactoe::Coord;
use std::path::PathBuf;
use std::str::FromStr;

/// Peer Sync - shared tic-tac-toe over a broadcast bus
#[derive(Parser, Debug)]
#[command(name = "peer_sync")]
#[command(about = "Synchronized tic-tac-toe between two peers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a scripted game between peers "A" and "B" on an in-process bus
    Demo {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board size override
        #[arg(long)]
        board_size: Option<usize>,

        /// Clicks as "row,col;row,col;...", alternating A then B
        #[arg(long, default_value = "0,0;0,1;0,2;1,1;1,0;1,2;2,1;2,0;2,2")]
        moves: MoveScript,
    },

    /// Parse a config file and report the result
    CheckConfig {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Scripted clicks, in play order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveScript(pub Vec<Coord>);

impl FromStr for MoveScript {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(';')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(|step| {
                let (row, col) = step
                    .split_once(',')
                    .ok_or_else(|| format!("expected \"row,col\", got {:?}", step))?;
                let parse = |v: &str| {
                    v.trim()
                        .parse::<usize>()
                        .map_err(|e| format!("bad coordinate {:?}: {}", v, e))
                };
                Ok(Coord::new(parse(row)?, parse(col)?))
            })
            .collect::<Result<Vec<_>, String>>()
            .map(MoveScript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_script() {
        let script: MoveScript = "0,0; 1, 2;".parse().unwrap();
        assert_eq!(script.0, vec![Coord::new(0, 0), Coord::new(1, 2)]);
    }

    #[test]
    fn test_parse_move_script_errors() {
        assert!("0".parse::<MoveScript>().is_err());
        assert!("0,-1".parse::<MoveScript>().is_err());
    }

    #[test]
    fn test_cli_parses_demo() {
        let cli = Cli::try_parse_from(["peer_sync", "demo", "--board-size", "4", "--moves", "3,3"]).unwrap();
        match cli.command {
            Command::Demo { board_size, moves, config } => {
                assert_eq!(board_size, Some(4));
                assert_eq!(moves.0, vec![Coord::new(3, 3)]);
                assert!(config.is_none());
            }
            Command::CheckConfig { .. } => panic!("expected demo"),
        }
    }
}
