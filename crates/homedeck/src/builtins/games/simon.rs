//! Simon says: echo a growing color sequence.

use rand::Rng;

use crate::error::{CoreError, CoreResult};

/// Best-scores key (longest sequence echoed).
pub const GAME_ID: &str = "simon-says";

pub const COLOR_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Correct so far; more of the sequence remains.
    Continue,
    /// The whole sequence was echoed; it grows by one color.
    RoundComplete,
    /// Wrong color — game over.
    GameOver,
}

#[derive(Debug)]
pub struct SimonGame {
    sequence: Vec<u8>,
    position: usize,
    score: u32,
    over: bool,
}

impl SimonGame {
    pub fn start<R: Rng>(rng: &mut R) -> Self {
        let mut game = Self {
            sequence: Vec::new(),
            position: 0,
            score: 0,
            over: false,
        };
        game.extend(rng);
        game
    }

    fn extend<R: Rng>(&mut self, rng: &mut R) {
        self.sequence.push(rng.gen_range(0..COLOR_COUNT));
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Judge one press against the sequence.
    pub fn press<R: Rng>(&mut self, rng: &mut R, color: u8) -> CoreResult<PressOutcome> {
        if self.over {
            return Err(CoreError::InvalidInput("game is over".to_string()));
        }
        if color >= COLOR_COUNT {
            return Err(CoreError::InvalidInput(format!("unknown color: {color}")));
        }
        if self.sequence[self.position] != color {
            self.over = true;
            return Ok(PressOutcome::GameOver);
        }
        self.position += 1;
        if self.position == self.sequence.len() {
            self.score += 1;
            self.position = 0;
            self.extend(rng);
            return Ok(PressOutcome::RoundComplete);
        }
        Ok(PressOutcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn starts_with_one_color() {
        let mut rng = StdRng::seed_from_u64(41);
        let game = SimonGame::start(&mut rng);
        assert_eq!(game.sequence().len(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn echoing_grows_the_sequence() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = SimonGame::start(&mut rng);

        let first = game.sequence()[0];
        assert_eq!(game.press(&mut rng, first).unwrap(), PressOutcome::RoundComplete);
        assert_eq!(game.score(), 1);
        assert_eq!(game.sequence().len(), 2);
    }

    #[test]
    fn full_round_requires_every_color_in_order() {
        let mut rng = StdRng::seed_from_u64(43);
        let mut game = SimonGame::start(&mut rng);
        game.press(&mut rng, game.sequence()[0]).unwrap();

        let sequence = game.sequence().to_vec();
        assert_eq!(
            game.press(&mut rng, sequence[0]).unwrap(),
            PressOutcome::Continue
        );
        assert_eq!(
            game.press(&mut rng, sequence[1]).unwrap(),
            PressOutcome::RoundComplete
        );
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn wrong_color_ends_the_game() {
        let mut rng = StdRng::seed_from_u64(44);
        let mut game = SimonGame::start(&mut rng);
        let wrong = (game.sequence()[0] + 1) % COLOR_COUNT;
        assert_eq!(game.press(&mut rng, wrong).unwrap(), PressOutcome::GameOver);
        assert!(game.is_over());
        assert!(game.press(&mut rng, 0).is_err());
    }

    #[test]
    fn out_of_range_color_rejected() {
        let mut rng = StdRng::seed_from_u64(45);
        let mut game = SimonGame::start(&mut rng);
        assert!(game.press(&mut rng, COLOR_COUNT).is_err());
        assert!(!game.is_over());
    }
}
