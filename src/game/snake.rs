use super::deque::{self, Deque};
use super::direction::Direction;
use super::food::{cell_count, find_food, ModelError};
use rand::Rng;
use ratatui::layout::{Position, Size};

/// The state of one round of the game: the snake, its heading, and the food.
///
/// All positions are relative to the top-left corner of the board.  The body
/// is stored front to back; which end of it is the head depends on
/// `flipped`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The dimensions of the board
    size: Size,

    /// The cells occupied by the snake.  If `flipped` is false, the head is at
    /// the front; otherwise, it's at the back.
    body: Deque<Position>,

    /// The direction in which the snake is moving, if it's been given one
    direction: Option<Direction>,

    state: SnakeState,

    /// Whether the back of `body` is currently the head
    flipped: bool,

    food: Position,
}

impl Snake {
    /// Create a snake consisting of a single cell in the middle of a board of
    /// size `size`, and place the first food.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board has no room for food besides the snake.
    pub(crate) fn new<R: Rng>(size: Size, rng: &mut R) -> Result<Snake, ModelError> {
        let mut body = Deque::new();
        let _ = body.push_back(Position::new(size.width / 2, size.height / 2));
        let food = find_food(size, &body, rng)?;
        Ok(Snake {
            size,
            body,
            direction: None,
            state: SnakeState::Idle,
            flipped: false,
            food,
        })
    }

    /// Create a new idle snake from one that has lost, keeping its body, food,
    /// and heading so that the player can resume where they crashed.
    ///
    /// If `self` has not lost, it is returned unchanged.
    pub(crate) fn continued(self) -> Snake {
        if self.state != SnakeState::Lost {
            tracing::warn!(state = ?self.state, "Only a lost snake can be continued");
            return self;
        }
        Snake {
            state: SnakeState::Idle,
            ..self
        }
    }

    pub(crate) fn state(&self) -> SnakeState {
        self.state
    }

    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(crate) fn flipped(&self) -> bool {
        self.flipped
    }

    pub(crate) fn food(&self) -> Position {
        self.food
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    /// Return the number of cells in the snake's body
    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Return the position of the snake's effective head
    pub(crate) fn head(&self) -> Option<Position> {
        if self.flipped {
            self.body.peek_back().copied()
        } else {
            self.body.peek_front().copied()
        }
    }

    /// Iterate over the cells of the snake's body from head to tail
    pub(crate) fn body(&self) -> Body<'_> {
        Body {
            inner: self.body.iter(),
            reversed: self.flipped,
        }
    }

    /// Change the snake's direction to `direction`, unless that would make a
    /// snake of two or more cells turn back into itself.  Either way, the
    /// snake becomes active.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.state.is_over() {
            tracing::warn!(state = ?self.state, "Ignoring direction change after game over");
            return;
        }
        match self.direction {
            Some(d) if direction == d.reverse() && self.body.len() > 1 => {
                tracing::debug!(?direction, "Refusing to reverse into body");
            }
            _ => self.direction = Some(direction),
        }
        self.activate();
    }

    /// Swap which end of the snake is the head.  The new direction continues
    /// the line traced by the former tail.
    pub(crate) fn flip(&mut self) {
        if self.state.is_over() {
            tracing::warn!(state = ?self.state, "Ignoring flip after game over");
            return;
        }
        match self.body.len() {
            0 => {
                tracing::warn!("Cannot flip a snake with no body");
                return;
            }
            1 => {
                let Some(d) = self.direction else {
                    tracing::debug!("Cannot flip a single-cell snake with no direction");
                    return;
                };
                self.direction = Some(d.reverse());
            }
            _ => {
                // The two cells nearest the end that is about to become the
                // head
                let mut tail_first = self.body().rev();
                let (Some(&last), Some(&second_last)) = (tail_first.next(), tail_first.next())
                else {
                    return;
                };
                match Direction::between(second_last, last) {
                    Some(d) => self.direction = Some(d),
                    None => tracing::warn!(
                        ?last,
                        ?second_last,
                        "Tail cells are not adjacent; keeping direction"
                    ),
                }
            }
        }
        self.flipped = !self.flipped;
        self.activate();
    }

    /// Move the snake forwards one cell, eating the food if it's there.
    ///
    /// Does nothing if the snake is not active.
    ///
    /// # Errors
    ///
    /// Returns `Err` if new food needs to be placed but there is no room for
    /// it.  This cannot happen unless the model's invariants have been broken.
    pub(crate) fn update<R: Rng>(&mut self, rng: &mut R) -> Result<(), ModelError> {
        if self.state != SnakeState::Active {
            tracing::warn!(state = ?self.state, "Snake updated while not active");
            return Ok(());
        }
        let Some(direction) = self.direction else {
            tracing::warn!("Active snake has no direction");
            return Ok(());
        };
        let Some(head) = self.head() else {
            tracing::warn!("Snake has no body");
            return Ok(());
        };
        let next = match direction.advance(head, self.size) {
            Some(p) if !self.body.contains(&p) => p,
            _ => {
                tracing::debug!(?head, ?direction, "Snake crashed");
                self.state = SnakeState::Lost;
                return Ok(());
            }
        };
        let id = if self.flipped {
            self.body.push_back(next)
        } else {
            self.body.push_front(next)
        };
        debug_assert_eq!(self.body.get(id), Some(&next), "new head not in body");
        if next == self.food {
            if self.body.len() == cell_count(self.size) {
                tracing::debug!("Snake fills the board");
                self.state = SnakeState::Won;
            } else {
                self.food = find_food(self.size, &self.body, rng)?;
            }
        } else {
            let _ = if self.flipped {
                self.body.pop_front()
            } else {
                self.body.pop_back()
            };
        }
        Ok(())
    }

    fn activate(&mut self) {
        if self.state == SnakeState::Idle {
            tracing::debug!("Snake is now active");
            self.state = SnakeState::Active;
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SnakeState {
    /// The snake has not been given a direction yet
    Idle,
    Active,
    /// The snake fills the board
    Won,
    /// The snake ran into a wall or itself
    Lost,
}

impl SnakeState {
    pub(crate) fn is_over(self) -> bool {
        matches!(self, SnakeState::Won | SnakeState::Lost)
    }
}

/// Iterator over a snake's cells from head to tail
#[derive(Clone, Debug)]
pub(crate) struct Body<'a> {
    inner: deque::Iter<'a, Position>,
    reversed: bool,
}

impl<'a> Iterator for Body<'a> {
    type Item = &'a Position;

    fn next(&mut self) -> Option<&'a Position> {
        if self.reversed {
            self.inner.next_back()
        } else {
            self.inner.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Body<'a> {
    fn next_back(&mut self) -> Option<&'a Position> {
        if self.reversed {
            self.inner.next()
        } else {
            self.inner.next_back()
        }
    }
}

impl ExactSizeIterator for Body<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    /// Build an active snake on a board of size `size` whose body runs from
    /// `cells[0]` (the head) to the last cell, given as `(x, y)` pairs
    fn snake_with_body(
        size: Size,
        cells: &[(u16, u16)],
        direction: Direction,
        food: (u16, u16),
    ) -> Snake {
        Snake {
            size,
            body: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction: Some(direction),
            state: SnakeState::Active,
            flipped: false,
            food: Position::new(food.0, food.1),
        }
    }

    fn body_of(snake: &Snake) -> Vec<(u16, u16)> {
        snake.body().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn new_snake() {
        let snake = Snake::new(Size::new(15, 10), &mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(7, 5)]);
        assert_eq!(snake.head(), Some(Position::new(7, 5)));
        assert_eq!(snake.state(), SnakeState::Idle);
        assert_eq!(snake.direction(), None);
        assert!(!snake.flipped());
        assert_ne!(snake.food(), Position::new(7, 5));
        assert!(snake.food().x < 15 && snake.food().y < 10);
    }

    #[test]
    fn new_snake_no_room_for_food() {
        let r = Snake::new(Size::new(1, 1), &mut rng());
        assert_eq!(r, Err(ModelError::BoardFull(Size::new(1, 1))));
    }

    #[test]
    fn update_before_direction_is_noop() {
        let mut snake = Snake::new(Size::new(5, 5), &mut rng()).unwrap();
        let before = snake.clone();
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake, before);
    }

    #[test]
    fn first_direction_activates() {
        let mut snake = Snake::new(Size::new(5, 5), &mut rng()).unwrap();
        snake.set_direction(Direction::West);
        assert_eq!(snake.state(), SnakeState::Active);
        assert_eq!(snake.direction(), Some(Direction::West));
    }

    #[test]
    fn move_without_food() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2)], Direction::East, (0, 4));
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(3, 2)]);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.state(), SnakeState::Active);
        assert_eq!(snake.food(), Position::new(0, 4));
    }

    #[test]
    fn move_longer_snake() {
        let mut snake = snake_with_body(
            Size::new(6, 6),
            &[(2, 2), (2, 3), (3, 3)],
            Direction::North,
            (5, 5),
        );
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(2, 1), (2, 2), (2, 3)]);
        snake.set_direction(Direction::West);
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(1, 1), (2, 1), (2, 2)]);
    }

    #[test]
    fn eat_food_grows_and_relocates() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2)], Direction::East, (3, 2));
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(3, 2), (2, 2)]);
        assert_eq!(snake.state(), SnakeState::Active);
        assert!(!snake.body().any(|&p| p == snake.food()));
    }

    #[test]
    fn fill_board_wins_without_placing_food() {
        // 2x2 board; snake occupies three cells and the food is the fourth.
        let mut snake = snake_with_body(
            Size::new(2, 2),
            &[(0, 1), (0, 0), (1, 0)],
            Direction::East,
            (1, 1),
        );
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Won);
        assert_eq!(snake.len(), 4);
        assert_eq!(body_of(&snake), [(1, 1), (0, 1), (0, 0), (1, 0)]);
        // The food is left where it was eaten.
        assert_eq!(snake.food(), Position::new(1, 1));
    }

    #[rstest]
    #[case(Direction::West, (0, 2))]
    #[case(Direction::East, (4, 2))]
    #[case(Direction::North, (2, 0))]
    #[case(Direction::South, (2, 4))]
    fn hitting_wall_loses(#[case] direction: Direction, #[case] head: (u16, u16)) {
        let mut snake = snake_with_body(Size::new(5, 5), &[head], direction, (1, 1));
        let before = body_of(&snake);
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Lost);
        assert_eq!(body_of(&snake), before);
    }

    #[test]
    fn hitting_self_loses() {
        let mut snake = snake_with_body(
            Size::new(5, 5),
            &[(1, 1), (2, 1), (2, 2), (1, 2), (0, 2)],
            Direction::South,
            (4, 4),
        );
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Lost);
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn moving_into_own_tail_loses() {
        // The tail would move out of the way this tick, but it still counts
        // as a collision.
        let mut snake = snake_with_body(
            Size::new(5, 5),
            &[(1, 1), (2, 1), (2, 2), (1, 2)],
            Direction::South,
            (4, 4),
        );
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Lost);
    }

    #[test]
    fn update_after_loss_is_noop() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(0, 0)], Direction::West, (3, 3));
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Lost);
        let before = snake.clone();
        snake.update(&mut rng()).unwrap();
        snake.set_direction(Direction::East);
        snake.flip();
        assert_eq!(snake, before);
    }

    #[rstest]
    #[case(Direction::North, Direction::South)]
    #[case(Direction::South, Direction::North)]
    #[case(Direction::East, Direction::West)]
    #[case(Direction::West, Direction::East)]
    fn cannot_reverse_long_snake(#[case] current: Direction, #[case] reverse: Direction) {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2), (2, 3)], current, (0, 0));
        snake.set_direction(reverse);
        assert_eq!(snake.direction(), Some(current));
        assert_eq!(snake.state(), SnakeState::Active);
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2)], Direction::North, (0, 0));
        snake.set_direction(Direction::South);
        assert_eq!(snake.direction(), Some(Direction::South));
    }

    #[test]
    fn turn_sideways() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2), (2, 3)], Direction::North, (0, 0));
        snake.set_direction(Direction::East);
        assert_eq!(snake.direction(), Some(Direction::East));
    }

    #[test]
    fn flip_single_cell() {
        let mut snake = snake_with_body(Size::new(5, 5), &[(2, 2)], Direction::East, (0, 0));
        snake.flip();
        assert!(snake.flipped());
        assert_eq!(snake.direction(), Some(Direction::West));
        snake.flip();
        assert!(!snake.flipped());
        assert_eq!(snake.direction(), Some(Direction::East));
    }

    #[test]
    fn flip_without_direction_is_noop() {
        let mut snake = Snake::new(Size::new(5, 5), &mut rng()).unwrap();
        let before = snake.clone();
        snake.flip();
        assert_eq!(snake, before);
        assert_eq!(snake.state(), SnakeState::Idle);
    }

    #[test]
    fn flip_empty_body_is_noop() {
        let mut snake = snake_with_body(Size::new(5, 5), &[], Direction::East, (0, 0));
        snake.flip();
        assert!(!snake.flipped());
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.len(), 0);
        assert_eq!(snake.state(), SnakeState::Active);
    }

    #[rstest]
    // Head at column 1, tail extends to the right: the tail end continues
    // rightwards.
    #[case(&[(1, 1), (2, 1)], Direction::West, Direction::East)]
    #[case(&[(2, 1), (1, 1)], Direction::East, Direction::West)]
    #[case(&[(1, 1), (1, 2)], Direction::North, Direction::South)]
    #[case(&[(1, 2), (1, 1)], Direction::South, Direction::North)]
    // Bent snake: only the last two cells matter
    #[case(&[(3, 3), (3, 2), (2, 2), (2, 1)], Direction::South, Direction::North)]
    #[case(&[(0, 0), (1, 0), (1, 1), (2, 1)], Direction::West, Direction::East)]
    fn flip_follows_tail(
        #[case] cells: &[(u16, u16)],
        #[case] before: Direction,
        #[case] after: Direction,
    ) {
        let mut snake = snake_with_body(Size::new(5, 5), cells, before, (4, 4));
        snake.flip();
        assert!(snake.flipped());
        assert_eq!(snake.direction(), Some(after));
        assert_eq!(snake.state(), SnakeState::Active);
        let last = *cells.last().unwrap();
        assert_eq!(snake.head(), Some(Position::new(last.0, last.1)));
    }

    #[test]
    fn flipped_snake_moves_from_back() {
        let mut snake = snake_with_body(
            Size::new(6, 6),
            &[(1, 1), (2, 1), (3, 1)],
            Direction::West,
            (5, 5),
        );
        snake.flip();
        assert_eq!(snake.direction(), Some(Direction::East));
        assert_eq!(body_of(&snake), [(3, 1), (2, 1), (1, 1)]);
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(4, 1), (3, 1), (2, 1)]);
        assert_eq!(snake.state(), SnakeState::Active);
        // Flip back: the old tail end becomes the head again, heading west
        snake.flip();
        assert!(!snake.flipped());
        assert_eq!(snake.direction(), Some(Direction::West));
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn flipped_snake_eats() {
        let mut snake = snake_with_body(Size::new(6, 6), &[(1, 1), (2, 1)], Direction::West, (3, 1));
        snake.flip();
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(3, 1), (2, 1), (1, 1)]);
        assert_eq!(snake.head(), Some(Position::new(3, 1)));
        assert_ne!(snake.food(), Position::new(3, 1));
    }

    #[test]
    fn continue_after_loss() {
        let mut snake = snake_with_body(
            Size::new(5, 5),
            &[(0, 1), (1, 1)],
            Direction::West,
            (3, 3),
        );
        snake.update(&mut rng()).unwrap();
        assert_eq!(snake.state(), SnakeState::Lost);
        let mut snake = snake.continued();
        assert_eq!(snake.state(), SnakeState::Idle);
        assert_eq!(body_of(&snake), [(0, 1), (1, 1)]);
        // Still may not reverse into the body
        snake.set_direction(Direction::East);
        assert_eq!(snake.direction(), Some(Direction::West));
        snake.set_direction(Direction::North);
        snake.update(&mut rng()).unwrap();
        assert_eq!(body_of(&snake), [(0, 0), (0, 1)]);
        assert_eq!(snake.state(), SnakeState::Active);
    }

    #[test]
    fn continue_active_snake_is_unchanged() {
        let snake = snake_with_body(Size::new(5, 5), &[(2, 2)], Direction::West, (3, 3));
        assert_eq!(snake.clone().continued(), snake);
    }

    #[test]
    fn play_until_won() {
        // Sweep a 2x3 board in a loop; the snake must end up filling it.
        let mut rng = rng();
        let mut snake = Snake::new(Size::new(2, 3), &mut rng).unwrap();
        assert_eq!(snake.head(), Some(Position::new(1, 1)));
        let cycle = [
            Direction::South,
            Direction::West,
            Direction::North,
            Direction::North,
            Direction::East,
            Direction::South,
        ];
        for d in cycle.into_iter().cycle().take(200) {
            if snake.state().is_over() {
                break;
            }
            snake.set_direction(d);
            snake.update(&mut rng).unwrap();
        }
        assert_eq!(snake.state(), SnakeState::Won);
        assert_eq!(snake.len(), 6);
    }
}
