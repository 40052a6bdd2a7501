mod deque;
mod direction;
mod ending;
mod food;
mod help;
mod info;
mod snake;
mod stopwatch;
use self::direction::Direction;
use self::ending::Ending;
use self::food::cell_count;
pub(crate) use self::food::ModelError;
use self::help::Help;
use self::info::InfoBar;
use self::snake::{Snake, SnakeState};
use self::stopwatch::Stopwatch;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, Globals};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = ThreadRng> {
    rng: R,
    snake: Snake,

    /// Time between movements of the snake
    tick_period: Duration,

    /// Number of times the player has continued after losing this round
    continues: u32,

    stopwatch: Stopwatch,

    /// Whether the help pop-up is shown
    help: bool,

    globals: Globals,
    next_tick: Option<Instant>,
}

impl Game<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Result<Self, ModelError> {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> Result<Game<R>, ModelError> {
        let snake = Snake::new(globals.board_size, &mut rng)?;
        tracing::info!(
            lines = globals.board_size.height,
            columns = globals.board_size.width,
            "Starting new game"
        );
        Ok(Game {
            rng,
            snake,
            tick_period: globals.config.game.tick_period,
            continues: 0,
            stopwatch: Stopwatch::new(),
            help: false,
            globals,
            next_tick: None,
        })
    }

    /// Wait for either the next tick or the next input event, whichever
    /// comes first, and act on it
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.ticking() {
            let now = Instant::now();
            let when = *self.next_tick.get_or_insert(now + self.tick_period);
            let wait = when.saturating_duration_since(now);
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = None;
                self.advance().map_err(io::Error::other)?;
                return Ok(None);
            }
        }
        self.handle_event(read()?).map_err(io::Error::other)
    }

    fn advance(&mut self) -> Result<(), ModelError> {
        self.snake.update(&mut self.rng)?;
        if self.snake.state().is_over() {
            self.finish_round();
        }
        self.sync_stopwatch(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<Option<Screen>, ModelError> {
        let now = Instant::now();
        if event == Event::FocusLost {
            if self.ticking() {
                self.help = true;
            }
        } else if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
            if let Some(screen) = self.handle_command(cmd, now)? {
                return Ok(Some(screen));
            }
        }
        self.sync_stopwatch(now);
        Ok(None)
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) -> Result<Option<Screen>, ModelError> {
        if cmd == Command::Quit {
            return Ok(Some(Screen::Quit));
        }
        if self.snake.state().is_over() {
            match cmd {
                Command::Continue if self.snake.state() == SnakeState::Lost => {
                    self.continue_round();
                }
                Command::Restart => self.restart(now)?,
                _ => tracing::debug!(?cmd, "Ignoring command after round end"),
            }
        } else if self.help {
            if cmd == Command::Help {
                self.help = false;
                self.next_tick = None;
            } else {
                tracing::debug!(?cmd, "Ignoring command while help is shown");
            }
        } else {
            match cmd {
                Command::Up => self.snake.set_direction(Direction::North),
                Command::Down => self.snake.set_direction(Direction::South),
                Command::Left => self.snake.set_direction(Direction::West),
                Command::Right => self.snake.set_direction(Direction::East),
                Command::Flip => self.snake.flip(),
                Command::Faster => {
                    self.set_tick_period(self.tick_period.div_f64(consts::SPEED_FACTOR));
                }
                Command::Slower => {
                    self.set_tick_period(self.tick_period.mul_f64(consts::SPEED_FACTOR));
                }
                Command::Help => self.help = true,
                Command::Continue | Command::Restart | Command::Quit => {
                    tracing::debug!(?cmd, "Ignoring command during round");
                }
            }
        }
        Ok(None)
    }

    /// Start a new round on the same board
    fn restart(&mut self, now: Instant) -> Result<(), ModelError> {
        self.snake = Snake::new(self.globals.board_size, &mut self.rng)?;
        self.tick_period = self.globals.config.game.tick_period;
        self.continues = 0;
        self.stopwatch.restart(now);
        self.help = false;
        self.next_tick = None;
        tracing::info!("Restarting game");
        Ok(())
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Whether the snake should currently be moving
    fn ticking(&self) -> bool {
        !self.help && self.snake.state() == SnakeState::Active
    }

    fn set_tick_period(&mut self, period: Duration) {
        self.tick_period = period.clamp(consts::MIN_TICK_PERIOD, consts::MAX_TICK_PERIOD);
        tracing::debug!(tick_period = ?self.tick_period, "Changed speed");
    }

    fn continue_round(&mut self) {
        self.snake = self.snake.clone().continued();
        self.continues += 1;
        self.next_tick = None;
        tracing::info!(continues = self.continues, "Continuing after loss");
    }

    fn finish_round(&mut self) {
        let score = u32::try_from(self.snake.len()).unwrap_or(u32::MAX);
        tracing::info!(
            score,
            state = ?self.snake.state(),
            direction = ?self.snake.direction(),
            flipped = self.snake.flipped(),
            continues = self.continues,
            "Round over"
        );
        self.globals.record_score(score);
        self.help = false;
    }

    /// Run the stopwatch exactly while the snake is moving
    fn sync_stopwatch(&mut self, now: Instant) {
        let ticking = self.ticking();
        if ticking && !self.stopwatch.is_running() {
            if self.stopwatch.is_paused() {
                self.stopwatch.resume(now);
            } else {
                self.stopwatch.start(now);
            }
        } else if !ticking && self.stopwatch.is_running() {
            self.stopwatch.pause(now);
        }
    }

    fn info_bar(&self) -> InfoBar {
        InfoBar {
            score: self.snake.len(),
            max_score: cell_count(self.snake.size()),
            speed: consts::TICK_PERIOD.as_secs_f64() / self.tick_period.as_secs_f64(),
            continues: self.continues,
            elapsed: self.stopwatch.elapsed(Instant::now()),
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [info_area, board_area] = Layout::vertical([
            Constraint::Length(consts::INFO_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(area);
        self.info_bar().render(info_area, buf);

        let board = self.snake.size();
        let block_size = Size {
            width: board
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: board.height.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered()
            .border_style(consts::BORDER_STYLE)
            .render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        let food = self.snake.food();
        if !self.snake.body().any(|&p| p == food) {
            canvas.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let mut body = self.snake.body();
        if let Some(&head) = body.next() {
            for &p in body {
                canvas.draw_cell(p, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
            }
            if self.snake.state() == SnakeState::Lost {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                canvas.draw_cell(head, consts::SNAKE_SYMBOL, consts::SNAKE_HEAD_STYLE);
            }
        }

        let state = self.snake.state();
        if state.is_over() {
            let ending = Ending::new(state == SnakeState::Won, self.globals.high_score());
            ending.render(center_rect(block_area, ending.size()), buf);
        } else if self.help {
            let help_area = center_rect(
                block_area,
                Size {
                    width: Help::WIDTH,
                    height: Help::HEIGHT,
                },
            );
            Help.render(help_area, buf);
        }
    }
}

/// Helper for drawing board cells, each `consts::CELL_WIDTH` terminal columns
/// wide, relative to the board's top-left corner
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| x.checked_add(self.area.x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for dx in 0..consts::CELL_WIDTH {
            let Some(x) = x.checked_add(dx) else {
                return;
            };
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(symbol);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}
