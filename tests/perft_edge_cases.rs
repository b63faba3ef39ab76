use scacchiera::fen::from_fen;
use scacchiera::perft::{divide, perft};
use shakmaty::fen::Fen;
use shakmaty::{Chess, Position};

fn run_perft_check(fen_str: &str, depth: u32, name: &str) {
    let board = from_fen(fen_str).expect("Valid FEN");
    let scacchiera_cnt = perft(&board, depth);

    let fen: Fen = fen_str.parse().unwrap();
    let pos: Chess = fen
        .into_position(shakmaty::CastlingMode::Standard)
        .expect("Shakmaty should accept FEN");
    let shakmaty_cnt = shakmaty_perft(&pos, depth);

    assert_eq!(
        scacchiera_cnt, shakmaty_cnt,
        "Mismatch in {name} at depth {depth}"
    );
}

fn shakmaty_perft(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for m in pos.legal_moves() {
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += shakmaty_perft(&new_pos, depth - 1);
    }
    nodes
}

#[test]
fn perft_en_passant_capture() {
    // White pawn on d5, black just played c7-c5
    let fen = "8/8/8/k1pP4/8/8/8/4K3 w - c6 0 1";
    run_perft_check(fen, 3, "En Passant Capture");
}

#[test]
fn perft_en_passant_exposes_king() {
    // exd3 would open the fourth rank to the queen on h4
    let fen = "8/8/8/8/k2Pp2Q/8/8/3K4 b - d3 0 1";
    run_perft_check(fen, 3, "En Passant Exposes King");

    let board = from_fen(fen).unwrap();
    let split = divide(&board, 1);
    assert!(split.iter().all(|(mv, _)| mv.to_uci() != "e4d3"));
}

#[test]
fn perft_double_check() {
    // Knight and bishop both give check; only king moves are admissible
    let fen = "4k3/8/3N4/1B6/8/8/8/4K3 b - - 0 1";
    let board = from_fen(fen).unwrap();
    assert!(board.current_player().is_in_check());
    run_perft_check(fen, 3, "Double Check");
}

#[test]
fn perft_pinned_piece_in_check() {
    // The rook checks along the e-file while the bishop pins the d2 knight
    let fen = "4k3/4r3/8/8/1b6/8/3N4/4K2R w - - 0 1";
    run_perft_check(fen, 3, "Pinned Piece In Check");
}

#[test]
fn perft_rook_edges() {
    // Rooks and queens on the board edges, probing wrap-around
    let fen = "q6r/8/4k3/8/2K5/8/8/R6Q w - - 0 1";
    run_perft_check(fen, 3, "Edge Sliders");
}
