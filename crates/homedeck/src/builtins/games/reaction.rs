//! Reaction test: press as soon as the light turns green.
//!
//! Time is injected in milliseconds so the state machine is testable without
//! sleeping; the shell supplies its own monotonic clock.

use rand::Rng;

use crate::error::{CoreError, CoreResult};

/// Best-scores key (lowest milliseconds).
pub const GAME_ID: &str = "reaction";

pub const MIN_DELAY_MS: u64 = 1000;
pub const MAX_DELAY_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// Pressed before the light turned green: the round is void.
    FalseStart,
    /// Measured reaction time in milliseconds.
    Reacted(u64),
}

#[derive(Debug, Default)]
pub struct ReactionTest {
    go_at_ms: Option<u64>,
}

impl ReactionTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the test at `now`; the light turns green after a random delay.
    pub fn arm<R: Rng>(&mut self, rng: &mut R, now_ms: u64) -> u64 {
        let delay = rng.gen_range(MIN_DELAY_MS..=MAX_DELAY_MS);
        self.go_at_ms = Some(now_ms + delay);
        delay
    }

    pub fn is_armed(&self) -> bool {
        self.go_at_ms.is_some()
    }

    /// Press at `now`. Either way the round is consumed.
    pub fn press(&mut self, now_ms: u64) -> CoreResult<ReactionOutcome> {
        let go_at = self
            .go_at_ms
            .take()
            .ok_or_else(|| CoreError::InvalidInput("test is not armed".to_string()))?;
        if now_ms < go_at {
            Ok(ReactionOutcome::FalseStart)
        } else {
            Ok(ReactionOutcome::Reacted(now_ms - go_at))
        }
    }
}
