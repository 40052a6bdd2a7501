//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default number of rows on the board
pub(crate) const DEFAULT_LINES: u16 = 15;

/// Default number of columns on the board
pub(crate) const DEFAULT_COLUMNS: u16 = 15;

/// Smallest number of rows a board may have; the help pop-up needs this many
pub(crate) const MIN_LINES: u16 = 8;

/// Smallest number of columns a board may have; the help pop-up needs this
/// many
pub(crate) const MIN_COLUMNS: u16 = 15;

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Fastest allowed time between movements of the snake
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Slowest allowed time between movements of the snake
pub(crate) const MAX_TICK_PERIOD: Duration = Duration::from_secs(2);

/// Factor by which the tick period is divided/multiplied when the player
/// speeds up/slows down
pub(crate) const SPEED_FACTOR: f64 = 1.5;

/// Number of terminal columns used to draw one cell of the board, so that
/// cells come out roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// Number of terminal rows above the board's border (the info bar)
pub(crate) const INFO_BAR_HEIGHT: u16 = 1;

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_SYMBOL: char = '█';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '█';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the end of the snake that is currently leading
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::Red);

/// Style for the board's border
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::White);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the info bar at the top of the game screen
pub(crate) const INFO_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the headline of the game-over pop-up
pub(crate) const HEADLINE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
