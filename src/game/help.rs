use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying the key bindings in a pop-up.  The game is paused
/// while it is shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Help;

impl Help {
    /// The height that should be used for the `Rect` passed to
    /// `Help::render()`
    pub(super) const HEIGHT: u16 = 8;

    /// The width that should be used for the `Rect` passed to
    /// `Help::render()`
    pub(super) const WIDTH: u16 = 25;
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum HelpLine {
    Steer,
    Flip,
    Faster,
    Slower,
    Resume,
    Quit,
}

impl HelpLine {
    fn keys(self) -> &'static str {
        match self {
            HelpLine::Steer => "←↑↓→",
            HelpLine::Flip => "space",
            HelpLine::Faster => "f",
            HelpLine::Slower => "s",
            HelpLine::Resume => "h/Esc",
            HelpLine::Quit => "q/F1",
        }
    }

    fn description(self) -> &'static str {
        match self {
            HelpLine::Steer => "steer",
            HelpLine::Flip => "flip head/tail",
            HelpLine::Faster => "speed up",
            HelpLine::Slower => "slow down",
            HelpLine::Resume => "resume",
            HelpLine::Quit => "quit",
        }
    }

    fn to_line(self) -> Line<'static> {
        Line::from_iter([
            Span::styled(format!("{:<6}", self.keys()), consts::KEY_STYLE),
            Span::raw(self.description()),
        ])
    }
}

impl Widget for Help {
    /*
     * ┌──────── HELP ─────────┐
     * │ ←↑↓→  steer           │
     * │ space flip head/tail  │
     * │ f     speed up        │
     * │ s     slow down       │
     * │ h/Esc resume          │
     * │ q/F1  quit            │
     * └───────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" HELP ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in HelpLine::iter().zip(inner.rows()) {
            line.to_line().render(row, buf);
        }
    }
}
