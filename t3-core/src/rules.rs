//! Stateless rules over a board snapshot
//!
//! A board reachable through legal play has at most one winner, so `winner`
//! checking X before O never has to break a tie.

use crate::board::{Board, Cell, RulesError, Side};

/// Winning lines: rows, columns, diagonals
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // columns
    [0, 4, 8], [2, 4, 6],            // diagonals
];

/// True if the cell at `position` holds a mark
pub fn is_occupied(board: &Board, position: usize) -> Result<bool, RulesError> {
    Ok(!board.get(position)?.is_empty())
}

/// Number of empty cells
pub fn available_moves(board: &Board) -> usize {
    board.cells().iter().filter(|cell| cell.is_empty()).count()
}

/// True if `side` holds any full row, column or diagonal
pub fn has_won(board: &Board, side: Side) -> bool {
    let cells = board.cells();
    LINES
        .iter()
        .any(|line| line.iter().all(|&pos| cells[pos] == Cell::Taken(side)))
}

/// True once the game is over, by a win or a full board
pub fn is_terminal(board: &Board) -> bool {
    available_moves(board) == 0 || has_won(board, Side::X) || has_won(board, Side::O)
}

/// True for a full board with no winner
pub fn is_draw(board: &Board) -> bool {
    is_terminal(board) && winner(board).is_none()
}

/// The winning side, or `None` for an ongoing game or a draw
pub fn winner(board: &Board) -> Option<Side> {
    if has_won(board, Side::X) {
        Some(Side::X)
    } else if has_won(board, Side::O) {
        Some(Side::O)
    } else {
        None
    }
}

/// Wire token for a result: `"x"`, `"o"`, or `""` for a draw
pub fn winner_token(winner: Option<Side>) -> &'static str {
    winner.map_or("", Side::token)
}
