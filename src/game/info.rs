use crate::consts;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};
use std::time::Duration;

/// The status line shown above the board
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct InfoBar {
    /// Current length of the snake
    pub(super) score: usize,

    /// Number of cells on the board
    pub(super) max_score: usize,

    /// Speed relative to the default tick period
    pub(super) speed: f64,

    pub(super) continues: u32,

    /// Time spent playing the current round
    pub(super) elapsed: Duration,
}

impl InfoBar {
    pub(super) fn text(&self) -> String {
        let width = self.max_score.to_string().len();
        let secs = self.elapsed.as_secs();
        format!(
            " Score: {score:>width$} / {max} │ Speed: x{speed:.2} │ Continues: {continues} │ {mm:02}:{ss:02}",
            score = self.score,
            max = self.max_score,
            speed = self.speed,
            continues = self.continues,
            mm = secs / 60,
            ss = secs % 60,
        )
    }
}

impl Widget for InfoBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(self.text(), consts::INFO_BAR_STYLE).render(area, buf);
    }
}
