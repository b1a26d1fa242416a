//! Bagh Chal - unified CLI.
//!
//! Plays a goat-side game against an authority: the in-process
//! opponent (`play`) or a remote game server (`online`).

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use baghchal::{
    CellState, ClickOutcome, GameSession, LocalAuthority, Point, Reconciler, RemoteAuthority,
    Renderer, RestAuthority, StartGameConfig,
};
use clap::Parser;
use cli::{Cli, Command};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { ai_level } => {
            info!("Starting offline game");
            let config = StartGameConfig {
                player_id: "local".to_string(),
                is_ai_game: true,
                ai_level,
            };
            run_game(Box::new(LocalAuthority::new()), config).await
        }
        Command::Online {
            server_url,
            player_id,
            ai_level,
        } => {
            info!(%server_url, "Connecting to remote authority");
            let config = StartGameConfig {
                player_id,
                is_ai_game: true,
                ai_level,
            };
            run_game(Box::new(RestAuthority::new(server_url)), config).await
        }
    }
}

/// Renderer that mirrors highlight state into a shared set the
/// console loop reads back when printing the board.
struct ConsoleRenderer {
    highlights: Arc<Mutex<HashSet<Point>>>,
}

impl Renderer for ConsoleRenderer {
    fn set_piece(&mut self, _p: Point, _state: CellState) {}

    fn set_highlight(&mut self, p: Point, active: bool) {
        let mut highlights = self.highlights.lock().unwrap();
        if active {
            highlights.insert(p);
        } else {
            highlights.remove(&p);
        }
    }

    fn clear_highlights(&mut self) {
        self.highlights.lock().unwrap().clear();
    }
}

/// Runs the interactive goat-side loop against `authority`.
async fn run_game(authority: Box<dyn RemoteAuthority>, config: StartGameConfig) -> Result<()> {
    let highlights = Arc::new(Mutex::new(HashSet::new()));
    let renderer = ConsoleRenderer {
        highlights: Arc::clone(&highlights),
    };

    let mut game = Reconciler::new(GameSession::with_renderer(Box::new(renderer)), authority);
    game.start(&config).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_board(game.session(), &highlights.lock().unwrap());
        if game.session().is_over() {
            if let Some(winner) = game.session().winner() {
                println!("Game over - {} wins!", winner);
            }
            return Ok(());
        }
        println!(
            "{} to move | goats in hand: {} | captured: {}",
            game.session().turn(),
            game.session().goats_in_hand(),
            game.session().captured_goats(),
        );
        println!("Enter a coordinate as 'x y' (or 'q' to quit):");

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let Some(p) = parse_point(input) else {
            println!("Could not parse '{}'", input);
            continue;
        };

        match game.handle_click(p).await {
            Ok(ClickOutcome::Ignored(err)) => println!("Ignored: {}", err),
            Ok(ClickOutcome::Selected(at)) => println!("Selected piece at {}", at),
            Ok(ClickOutcome::Placed(action)) => println!("{}", action),
            Ok(ClickOutcome::Moved { action, captured }) => {
                println!("{}", action);
                if let Some(goat) = captured {
                    println!("Captured goat at {}", goat);
                }
            }
            // Authority failure: optimistic state is kept, keep playing.
            Err(err) => eprintln!("Authority error: {:#}", err),
        }
    }
}

/// Parses "x y" into a point.
fn parse_point(input: &str) -> Option<Point> {
    let mut parts = input.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Point::new(x, y))
}

/// Prints the board; highlighted cells are marked with `*`.
fn print_board(session: &GameSession, highlights: &HashSet<Point>) {
    println!("\n    0  1  2  3  4");
    for y in 0..5 {
        print!(" {} ", y);
        for x in 0..5 {
            let p = Point::new(x, y);
            let symbol = match session.board().get(p) {
                CellState::Empty => '.',
                CellState::Tiger => 'T',
                CellState::Goat => 'G',
            };
            if highlights.contains(&p) {
                print!("{}* ", symbol);
            } else {
                print!("{}  ", symbol);
            }
        }
        println!();
    }
}
