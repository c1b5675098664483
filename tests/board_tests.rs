//! Board tests through the facade crate

use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
    for x in 0..board.width() as i32 {
        board.set(x, y, Some(kind));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT);
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);

    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(10, 20);
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(10, 20);
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(10, 10, Some(PieceKind::T)));
}

#[test]
fn test_clear_rows_five_and_seven() {
    let mut board = Board::new(10, 20);
    fill_row(&mut board, 5, PieceKind::I);
    fill_row(&mut board, 7, PieceKind::J);
    // Markers in the surviving rows around the cleared ones.
    board.set(0, 4, Some(PieceKind::S));
    board.set(1, 6, Some(PieceKind::Z));
    board.set(2, 8, Some(PieceKind::L));

    assert_eq!(board.clear_full_rows(), 2);

    // Rows above each cleared row moved down by the number of cleared rows below them.
    assert_eq!(board.get(0, 6), Some(Some(PieceKind::S)));
    assert_eq!(board.get(1, 7), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(2, 8), Some(Some(PieceKind::L)));
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
    assert!(board.row(1).unwrap().iter().all(|c| c.is_none()));
    assert_eq!(board.filled_count(), 3);
    assert_eq!(board.rows().count(), 20);
}

#[test]
fn test_stamp_tags_only_piece_cells() {
    let mut board = Board::new(10, 20);
    let piece = Piece::at(PieceKind::T, 3, 10);
    let before = board.clone();

    assert_eq!(board.stamp(&piece), 4);

    for y in 0..20 {
        for x in 0..10 {
            let on_piece = piece.cells().any(|cell| cell == (x, y));
            if on_piece {
                assert_eq!(board.get(x, y), Some(Some(PieceKind::T)));
            } else {
                assert_eq!(board.get(x, y), before.get(x, y));
            }
        }
    }
}

#[test]
fn test_narrow_board_rejects_wide_piece() {
    let board = Board::new(3, 5);
    assert!(!board.accepts(&Piece::spawn(PieceKind::I, 3)));
    assert!(board.accepts(&Piece::spawn(PieceKind::T, 3)));
}
