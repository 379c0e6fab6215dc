use crate::highscores::{HighScoreStore, SaveError};

/// The current game's score together with the best score seen so far
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScoreTracker<S> {
    score: u32,
    high_score: u32,
    store: S,
}

impl<S: HighScoreStore> ScoreTracker<S> {
    pub(crate) fn new(store: S, high_score: u32) -> ScoreTracker<S> {
        ScoreTracker {
            score: 0,
            high_score,
            store,
        }
    }

    pub(crate) fn add_reward(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    pub(crate) fn reset(&mut self) {
        self.score = 0;
    }

    /// Raise the high score to `score` if it is strictly greater, saving the
    /// new value to the store.  Returns `Ok(true)` if the high score changed.
    ///
    /// If saving fails, the in-memory high score is still updated.
    pub(crate) fn maybe_update_high_score(&mut self, score: u32) -> Result<bool, SaveError> {
        if score <= self.high_score {
            return Ok(false);
        }
        self.high_score = score;
        self.store.save(score)?;
        Ok(true)
    }
}

impl<S> ScoreTracker<S> {
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
