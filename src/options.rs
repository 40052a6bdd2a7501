use crate::config::GameConfig;
use crate::consts;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::layout::Size;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) const USAGE: &str = "\
Usage: flipsnake [OPTIONS] [SIZE | max | NLINES NCOLS]

Play Snake in the terminal.  Press space to swap the snake's head and tail.

Arguments:
  SIZE            Play on a SIZE x SIZE board
  max             Play on the largest board that fits in the terminal
  NLINES NCOLS    Play on a board with NLINES rows and NCOLS columns

Options:
  -c, --config <PATH>     Read configuration from PATH
      --log-file <PATH>   Write diagnostic logs to PATH
  -h, --help              Show this help and exit
  -V, --version           Show the program version and exit
";

/// Parsed command-line arguments
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Arguments {
    Run(RunOptions),
    Help,
    Version,
}

impl Arguments {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        let mut positionals = Vec::new();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(v) => positionals.push(v.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        let size = BoardSize::from_args(&positionals)?;
        Ok(Arguments::Run(RunOptions {
            config,
            log_file,
            size,
        }))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RunOptions {
    pub(crate) config: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) size: BoardSize,
}

/// The board size requested on the command line
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum BoardSize {
    /// Use the size from the configuration file
    #[default]
    Configured,

    /// Fill the terminal
    Max,

    /// A square board with the given number of lines & columns
    Square(u16),

    Dims {
        lines: u16,
        columns: u16,
    },
}

impl BoardSize {
    fn from_args(args: &[String]) -> Result<BoardSize, lexopt::Error> {
        match args {
            [] => Ok(BoardSize::Configured),
            [s] if s.eq_ignore_ascii_case("max") => Ok(BoardSize::Max),
            [s] => Ok(BoardSize::Square(parse_dimension(s)?)),
            [lines, columns] => Ok(BoardSize::Dims {
                lines: parse_dimension(lines)?,
                columns: parse_dimension(columns)?,
            }),
            [_, _, extra, ..] => Err(lexopt::Error::UnexpectedArgument(extra.into())),
        }
    }

    /// Determine the board size in cells for a terminal of size `term`
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board would not fit in the terminal or would be
    /// too small for the pop-ups.
    pub(crate) fn resolve(self, term: Size, game: &GameConfig) -> Result<Size, SizeError> {
        let board = match self {
            BoardSize::Configured => game.board_size,
            BoardSize::Max => Size {
                width: term.width.saturating_sub(2) / consts::CELL_WIDTH,
                height: term.height.saturating_sub(consts::INFO_BAR_HEIGHT + 2),
            },
            BoardSize::Square(n) => Size::new(n, n),
            BoardSize::Dims { lines, columns } => Size::new(columns, lines),
        };
        if board.height < consts::MIN_LINES || board.width < consts::MIN_COLUMNS {
            return Err(SizeError::TooSmall(board));
        }
        if display_size(board).is_some_and(|sz| sz.width <= term.width && sz.height <= term.height)
        {
            Ok(board)
        } else {
            Err(SizeError::TooLarge { board, term })
        }
    }
}

/// Return the number of terminal columns & rows needed to display a board of
/// size `board` along with its border and the info bar
pub(crate) fn display_size(board: Size) -> Option<Size> {
    let width = board.width.checked_mul(consts::CELL_WIDTH)?.checked_add(2)?;
    let height = board.height.checked_add(consts::INFO_BAR_HEIGHT + 2)?;
    Some(Size { width, height })
}

fn parse_dimension(s: &str) -> Result<u16, lexopt::Error> {
    s.parse::<u16>().map_err(|e| lexopt::Error::ParsingFailed {
        value: s.to_owned(),
        error: Box::new(e),
    })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SizeError {
    #[error(
        "{}x{} board is too small; boards must be at least {}x{} (lines x columns)",
        .0.height,
        .0.width,
        consts::MIN_LINES,
        consts::MIN_COLUMNS
    )]
    TooSmall(Size),
    #[error(
        "{}x{} board does not fit in a terminal of {} lines and {} columns",
        .board.height,
        .board.width,
        .term.height,
        .term.width
    )]
    TooLarge { board: Size, term: Size },
}
