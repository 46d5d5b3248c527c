use serde::{Deserialize, Serialize};

/// Per-session tallies reported on the game-over screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub submissions: u32,
    pub words_matched: u32,
    /// Words that crossed the bottom boundary.
    pub words_missed: u32,
    /// Words that ran into the player.
    pub collisions: u32,
    pub powerups_collected: u32,
}

impl SessionStats {
    /// Matched submissions as a whole percentage (0 when nothing was submitted).
    pub fn accuracy(&self) -> u32 {
        if self.submissions == 0 {
            return 0;
        }
        self.words_matched * 100 / self.submissions
    }
}
