use super::deque::Deque;
use rand::Rng;
use ratatui::layout::{Position, Size};
use thiserror::Error;

/// Choose a uniformly random cell of a board of size `size` that is not
/// occupied by `body`.
///
/// # Errors
///
/// Returns [`ModelError::BoardFull`] if every cell is occupied.
pub(super) fn find_food<R: Rng>(
    size: Size,
    body: &Deque<Position>,
    rng: &mut R,
) -> Result<Position, ModelError> {
    let free = cell_count(size).saturating_sub(body.len());
    if free == 0 {
        return Err(ModelError::BoardFull(size));
    }
    let k = rng.random_range(0..free);
    nth_free_cell(size, body, k).ok_or(ModelError::BoardFull(size))
}

/// Return the `k`-th (zero-based) cell not occupied by `body`, scanning the
/// board row by row from the top and each row from the left
pub(super) fn nth_free_cell(size: Size, body: &Deque<Position>, k: usize) -> Option<Position> {
    let width = usize::from(size.width);
    let mut taken = vec![false; cell_count(size)];
    for pos in body {
        if pos.x < size.width && pos.y < size.height {
            taken[usize::from(pos.y) * width + usize::from(pos.x)] = true;
        }
    }
    let i = taken
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| (!t).then_some(i))
        .nth(k)?;
    // Both quotient and remainder are bounded by u16 dimensions.
    let x = u16::try_from(i % width).ok()?;
    let y = u16::try_from(i / width).ok()?;
    Some(Position { x, y })
}

/// Return the number of cells on a board of size `size`
pub(crate) fn cell_count(size: Size) -> usize {
    usize::from(size.width) * usize::from(size.height)
}

/// Errors indicating that the snake model has been driven into a state it
/// cannot continue from
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ModelError {
    #[error("cannot place food: all cells of the {}x{} board are occupied", .0.width, .0.height)]
    BoardFull(Size),
}
