//! Memory: pair-matching board.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{CoreError, CoreResult};

/// Best-scores key (fewest moves).
pub const GAME_ID: &str = "memory";

pub const MIN_PAIRS: usize = 2;
pub const MAX_PAIRS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a move revealed.
    Revealed,
    /// Second card matched; both stay face up.
    Matched,
    /// Second card mismatched; both flip back down.
    Mismatch,
}

#[derive(Debug)]
pub struct MemoryGame {
    board: Vec<u8>,
    matched: Vec<bool>,
    first_flip: Option<usize>,
    moves: u32,
}

impl MemoryGame {
    /// A shuffled board of `pairs` symbol pairs.
    pub fn new<R: Rng>(rng: &mut R, pairs: usize) -> CoreResult<Self> {
        if !(MIN_PAIRS..=MAX_PAIRS).contains(&pairs) {
            return Err(CoreError::InvalidInput(format!(
                "pairs must be {MIN_PAIRS}..={MAX_PAIRS}"
            )));
        }
        let mut board: Vec<u8> = (0..pairs as u8).flat_map(|s| [s, s]).collect();
        board.shuffle(rng);
        let size = board.len();
        Ok(Self {
            board,
            matched: vec![false; size],
            first_flip: None,
            moves: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.board.len()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// The symbol at an index — the board is open knowledge to the shell,
    /// which renders cards face down.
    pub fn symbol_at(&self, index: usize) -> Option<u8> {
        self.board.get(index).copied()
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.matched.iter().all(|&m| m)
    }

    /// Flip a card. A completed move (two flips) increments the move
    /// counter.
    pub fn flip(&mut self, index: usize) -> CoreResult<FlipOutcome> {
        if index >= self.board.len() {
            return Err(CoreError::InvalidInput(format!(
                "card index out of range: {index}"
            )));
        }
        if self.matched[index] || self.first_flip == Some(index) {
            return Err(CoreError::InvalidInput(
                "card is already face up".to_string(),
            ));
        }
        match self.first_flip.take() {
            None => {
                self.first_flip = Some(index);
                Ok(FlipOutcome::Revealed)
            }
            Some(first) => {
                self.moves += 1;
                if self.board[first] == self.board[index] {
                    self.matched[first] = true;
                    self.matched[index] = true;
                    Ok(FlipOutcome::Matched)
                } else {
                    Ok(FlipOutcome::Mismatch)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn positions_of(game: &MemoryGame, symbol: u8) -> Vec<usize> {
        (0..game.size())
            .filter(|&i| game.symbol_at(i) == Some(symbol))
            .collect()
    }

    #[test]
    fn board_holds_every_symbol_twice() {
        let mut rng = StdRng::seed_from_u64(31);
        let game = MemoryGame::new(&mut rng, 6).unwrap();
        assert_eq!(game.size(), 12);
        for symbol in 0..6 {
            assert_eq!(positions_of(&game, symbol).len(), 2);
        }
    }

    #[test]
    fn matching_pair_stays_revealed() {
        let mut rng = StdRng::seed_from_u64(32);
        let mut game = MemoryGame::new(&mut rng, 3).unwrap();
        let pair = positions_of(&game, 0);

        assert_eq!(game.flip(pair[0]).unwrap(), FlipOutcome::Revealed);
        assert_eq!(game.flip(pair[1]).unwrap(), FlipOutcome::Matched);
        assert!(game.is_matched(pair[0]) && game.is_matched(pair[1]));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn mismatch_hides_both() {
        let mut rng = StdRng::seed_from_u64(33);
        let mut game = MemoryGame::new(&mut rng, 3).unwrap();
        let zero = positions_of(&game, 0);
        let one = positions_of(&game, 1);

        game.flip(zero[0]).unwrap();
        assert_eq!(game.flip(one[0]).unwrap(), FlipOutcome::Mismatch);
        assert!(!game.is_matched(zero[0]));
        assert!(!game.is_matched(one[0]));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn completing_all_pairs_wins() {
        let mut rng = StdRng::seed_from_u64(34);
        let mut game = MemoryGame::new(&mut rng, 2).unwrap();
        for symbol in 0..2 {
            let pair = positions_of(&game, symbol);
            game.flip(pair[0]).unwrap();
            game.flip(pair[1]).unwrap();
        }
        assert!(game.is_complete());
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn illegal_flips_rejected() {
        let mut rng = StdRng::seed_from_u64(35);
        let mut game = MemoryGame::new(&mut rng, 2).unwrap();
        assert!(game.flip(99).is_err());

        game.flip(0).unwrap();
        assert!(game.flip(0).is_err(), "same card twice in one move");

        let pair = positions_of(&game, game.symbol_at(0).unwrap());
        let other = pair.into_iter().find(|&i| i != 0).unwrap();
        game.flip(other).unwrap();
        assert!(game.flip(0).is_err(), "matched card flipped again");
    }

    #[test]
    fn pair_bounds_enforced() {
        let mut rng = StdRng::seed_from_u64(36);
        assert!(MemoryGame::new(&mut rng, 1).is_err());
        assert!(MemoryGame::new(&mut rng, 13).is_err());
    }
}
