use clap::Parser;
use scacchiera::fen::{from_fen, STARTING_FEN};
use scacchiera::perft::divide;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(STARTING_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Cross-check every root move against shakmaty
    #[arg(short, long)]
    compare: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("Running perft on FEN: '{}' at depth {}", args.fen, args.depth);

    let position = match from_fen(&args.fen) {
        Ok(position) => position,
        Err(e) => {
            eprintln!("Cannot load position: {}", e);
            std::process::exit(1);
        }
    };

    let start = std::time::Instant::now();
    let split = divide(&position, args.depth);
    let duration = start.elapsed();

    for (mv, nodes) in &split {
        println!("{}: {}", mv.to_uci(), nodes);
    }
    let nodes: u64 = if args.depth == 0 { 1 } else { split.iter().map(|(_, n)| n).sum() };
    println!(
        "perft({}) = {} nodes ({} ms)",
        args.depth,
        nodes,
        duration.as_millis()
    );

    if args.compare {
        let chess = match shakmaty_position(&args.fen) {
            Some(chess) => chess,
            None => {
                eprintln!("shakmaty cannot load '{}'", args.fen);
                std::process::exit(1);
            }
        };
        let expected = perft_shakmaty(&chess, args.depth);
        if expected == nodes {
            info!(nodes, "shakmaty agrees");
        } else {
            warn!(got = nodes, expected, "perft mismatch against shakmaty");
            std::process::exit(2);
        }
    }
}

fn shakmaty_position(fen: &str) -> Option<Chess> {
    let fen: Fen = fen.parse().ok()?;
    fen.into_position(CastlingMode::Standard).ok()
}

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}
