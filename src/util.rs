use crate::config::Config;
use crate::highscores::HighScores;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::num::NonZeroU32;

/// Application-wide state that outlives individual rounds
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: Config,
    pub(crate) high_scores: HighScores,
    /// Size of the board in cells
    pub(crate) board_size: Size,
}

impl Globals {
    /// Return the best score so far for the current board size
    pub(crate) fn high_score(&self) -> u32 {
        self.high_scores
            .get(self.board_size)
            .map_or(0, NonZeroU32::get)
    }

    /// Record `score` as the new high score for the current board size if it
    /// beats the old one, and save the high scores to disk if so.
    pub(crate) fn record_score(&mut self, score: u32) {
        let Some(score) = NonZeroU32::new(score) else {
            return;
        };
        if self
            .high_scores
            .get(self.board_size)
            .is_some_and(|best| best >= score)
        {
            return;
        }
        tracing::info!(score = score.get(), "New high score");
        self.high_scores.set(self.board_size, score);
        if let Err(e) = self.config.save_high_scores(&self.high_scores) {
            tracing::error!("Could not save high scores: {:#}", anyhow::Error::new(e));
        }
    }
}

pub(crate) trait EnumExt: Enum + Sized {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit if
/// necessary
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}
