use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for the pop-up shown when a round is over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Ending {
    /// Whether the snake filled the board
    won: bool,

    /// Best score for the board size, including the round just finished
    high_score: u32,
}

impl Ending {
    /// The width that should be used for the `Rect` passed to
    /// `Ending::render()`
    pub(super) const WIDTH: u16 = 21;

    pub(super) fn new(won: bool, high_score: u32) -> Ending {
        Ending { won, high_score }
    }

    /// The size that should be used for the `Rect` passed to
    /// `Ending::render()`.  A won round cannot be continued, so its pop-up
    /// is one line shorter.
    pub(super) fn size(&self) -> Size {
        let lines = self.lines().count();
        Size {
            width: Self::WIDTH,
            height: u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2),
        }
    }

    fn lines(&self) -> impl Iterator<Item = Line<'static>> {
        let headline = if self.won { "YOU WIN!" } else { "YOU LOSE!" };
        let mut lines = vec![
            Line::styled(headline, consts::HEADLINE_STYLE).centered(),
            Line::from(format!("High Score: {}", self.high_score)),
        ];
        if !self.won {
            lines.push(key_line("Continue", "c"));
        }
        lines.push(key_line("Restart", "r"));
        lines.push(key_line("Quit", "q"));
        lines.into_iter()
    }
}

fn key_line(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

impl Widget for Ending {
    /*
     * ┌───────────────────┐
     * │     YOU LOSE!     │
     * │ High Score: 12    │
     * │ Continue (c)      │
     * │ Restart (r)       │
     * │ Quit (q)          │
     * └───────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
