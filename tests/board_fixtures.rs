use scacchiera::utils::algebraic_to_square;
use scacchiera::{Alliance, BoardError, Builder, Move, Piece, PieceKind, Position};

fn sq(name: &str) -> usize {
    algebraic_to_square(name).unwrap()
}

fn kings_and(extra: &[Piece]) -> Position {
    let mut builder = Builder::new();
    builder
        .set_piece(Piece::king(Alliance::White, sq("e1"), false, false))
        .set_piece(Piece::king(Alliance::Black, sq("e8"), false, false));
    for piece in extra {
        builder.set_piece(*piece);
    }
    builder.set_move_maker(Alliance::White);
    builder.build().unwrap()
}

#[test]
fn standard_board_legal_moves() {
    let board = Position::standard();
    for player in [board.white_player(), board.black_player()] {
        assert_eq!(player.legal_moves().len(), 20);
        assert!(!player.is_in_check());
        assert!(!player.is_in_checkmate());
        assert!(!player.is_in_stalemate());
        assert!(!player.is_castled());
        assert!(player.is_king_side_castle_capable());
        assert!(player.is_queen_side_castle_capable());
        assert!(player.legal_moves().iter().all(|m| !m.is_attack() && !m.is_castling_move()));
    }
    assert_eq!(board.current_player().alliance(), Alliance::White);
    assert_eq!(board.white_player().opponent().alliance(), Alliance::Black);
    assert_eq!(board.white_player().to_string(), "White");
    assert_eq!(board.black_player().to_string(), "Black");
    assert_eq!(board.all_legal_moves().count(), 40);
    assert_eq!(board.all_pieces().count(), 32);
}

#[test]
fn piece_count_matches_occupied_squares() {
    let board = Position::standard();
    let occupied = board.layout().squares().iter().filter(|s| s.is_some()).count();
    assert_eq!(board.white_pieces().len() + board.black_pieces().len(), occupied);
    assert!(board.white_pieces().iter().all(|p| p.alliance() == Alliance::White));
    assert!(board.black_pieces().iter().all(|p| p.alliance() == Alliance::Black));
}

#[test]
fn two_bare_kings() {
    let board = kings_and(&[]);
    assert_eq!(board.white_player().legal_moves().len(), 5);
    assert_eq!(board.black_player().legal_moves().len(), 5);
    assert!(!board.is_check_situation());
    assert!(!board.is_end_game());
}

#[test]
fn lone_bishop_counts() {
    let center = kings_and(&[Piece::new(PieceKind::Bishop, Alliance::White, sq("d4"))]);
    assert_eq!(center.white_player().legal_moves().len(), 18);
    assert_eq!(center.black_player().legal_moves().len(), 5);

    for corner in ["a8", "h8"] {
        let board = kings_and(&[Piece::new(PieceKind::Bishop, Alliance::White, sq(corner))]);
        assert_eq!(board.white_player().legal_moves().len(), 12, "bishop on {}", corner);
    }
}

#[test]
fn lone_queen_counts() {
    let board = kings_and(&[Piece::new(PieceKind::Queen, Alliance::White, sq("e4"))]);
    assert_eq!(board.white_player().legal_moves().len(), 31);
    assert_eq!(board.black_player().legal_moves().len(), 5);
    assert!(board.black_player().is_in_check());
    assert!(board.is_check_situation());
}

#[test]
fn facing_knights() {
    let board = kings_and(&[
        Piece::new(PieceKind::Knight, Alliance::White, sq("e4")),
        Piece::new(PieceKind::Knight, Alliance::Black, sq("e5")),
    ]);
    assert_eq!(board.white_player().legal_moves().len(), 13);
    assert_eq!(board.black_player().legal_moves().len(), 13);
}

#[test]
fn corner_knights() {
    let board = kings_and(&[
        Piece::new(PieceKind::Knight, Alliance::White, sq("a1")),
        Piece::new(PieceKind::Knight, Alliance::Black, sq("a8")),
    ]);
    assert_eq!(board.white_player().legal_moves().len(), 7);
    assert_eq!(board.black_player().legal_moves().len(), 7);
}

#[test]
fn king_edge_exclusions() {
    // Kings in the corners and on the side edges, far from each other
    let cases = [("a1", "h8", 3), ("h1", "a8", 3), ("a4", "h5", 5), ("h4", "a5", 5)];
    for (white, black, expected) in cases {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Alliance::White, sq(white), false, false))
            .set_piece(Piece::king(Alliance::Black, sq(black), false, false));
        let board = builder.build().unwrap();
        assert_eq!(board.white_player().legal_moves().len(), expected, "king on {}", white);
        assert_eq!(board.black_player().legal_moves().len(), expected, "king on {}", black);
    }
}

#[test]
fn builder_rejects_bad_configurations() {
    let mut builder = Builder::new();
    builder.set_piece(Piece::king(Alliance::Black, sq("e8"), false, false));
    assert_eq!(builder.build().unwrap_err(), BoardError::MissingKing(Alliance::White));

    builder.set_piece(Piece::king(Alliance::White, sq("e1"), false, false));
    builder.set_piece(Piece::king(Alliance::White, sq("d1"), false, false));
    assert_eq!(builder.build().unwrap_err(), BoardError::DuplicateKing(Alliance::White));
}

#[test]
fn algebraic_notation_is_a_bijection() {
    use scacchiera::utils::square_to_algebraic;
    for index in 0..64 {
        assert_eq!(algebraic_to_square(square_to_algebraic(index)), Some(index));
    }
    assert_eq!(square_to_algebraic(0), "a8");
    assert_eq!(square_to_algebraic(63), "h1");
}

#[test]
fn null_move_is_never_legal() {
    let board = Position::standard();
    assert!(!board.current_player().is_move_legal(&Move::Null));
    assert!(board.all_legal_moves().all(|m| !m.is_null()));
}
