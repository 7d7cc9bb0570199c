use t3_core::Board;

/// Trait for bot move selection
pub trait Policy: Send + Sync {
    /// Select a position to play, or `None` when the board has no empty cell
    fn select_position(&mut self, board: &Board) -> Option<usize>;
}

/// Deterministic bot that always plays the lowest-indexed empty cell
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmptyPolicy;

impl Policy for FirstEmptyPolicy {
    fn select_position(&mut self, board: &Board) -> Option<usize> {
        board.first_empty()
    }
}
