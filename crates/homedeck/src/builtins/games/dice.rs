//! Dice roller.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};

pub const MAX_DICE: u32 = 5;
pub const ALLOWED_SIDES: [u32; 6] = [4, 6, 8, 10, 12, 20];
const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiceRoll {
    pub count: u32,
    pub sides: u32,
    pub rolls: Vec<u32>,
    pub total: u32,
}

impl DiceRoll {
    /// `3d6: 11 [4, 2, 5]`
    pub fn describe(&self) -> String {
        let rolls: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        format!("{}d{}: {} [{}]", self.count, self.sides, self.total, rolls.join(", "))
    }
}

pub fn roll<R: Rng>(rng: &mut R, count: u32, sides: u32) -> CoreResult<DiceRoll> {
    if count == 0 || count > MAX_DICE {
        return Err(CoreError::InvalidInput(format!(
            "dice count must be 1..={MAX_DICE}"
        )));
    }
    if !ALLOWED_SIDES.contains(&sides) {
        return Err(CoreError::InvalidInput(format!("unsupported die: d{sides}")));
    }
    let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
    let total = rolls.iter().sum();
    Ok(DiceRoll {
        count,
        sides,
        rolls,
        total,
    })
}

/// Rolling history, newest first, capped at five entries.
#[derive(Debug, Default)]
pub struct DiceHistory {
    entries: Vec<DiceRoll>,
}

impl DiceHistory {
    pub fn push(&mut self, roll: DiceRoll) {
        self.entries.insert(0, roll);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[DiceRoll] {
        &self.entries
    }
}
