//! Scacchiera command line: print a position and the move the minimax
//! search recommends for the side to move.

use std::process::ExitCode;

use clap::Parser;
use scacchiera::fen::{from_fen, STARTING_FEN};
use scacchiera::search::{Minimax, SearchParams};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search, as FEN
    #[arg(short, long, default_value_t = String::from(STARTING_FEN))]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 3)]
    depth: u32,

    /// Threads sharing the root moves
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Log search statistics when done
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let position = match from_fen(&args.fen) {
        Ok(position) => position,
        Err(e) => {
            eprintln!("Cannot load position: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", position);
    let player = position.current_player();
    if player.is_in_checkmate() {
        println!("{} is checkmated", player);
        return ExitCode::SUCCESS;
    }
    if player.is_in_stalemate() {
        println!("{} is stalemated", player);
        return ExitCode::SUCCESS;
    }

    let params = SearchParams::new()
        .depth(args.depth)
        .threads(args.threads)
        .log_stats(args.stats);
    let mut search = Minimax::new(params);
    match search.search_with_value(&position) {
        Some((mv, value)) => {
            println!("bestmove {} ({}) value {}", mv.to_uci(), mv, value);
            ExitCode::SUCCESS
        }
        None => {
            println!("{} has no move", player);
            ExitCode::SUCCESS
        }
    }
}
