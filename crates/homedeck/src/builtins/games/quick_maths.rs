//! Quick maths: answer as many generated problems as possible in 30 seconds.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

pub const ROUND_SECONDS: i32 = 30;
pub const CORRECT_BONUS_SECONDS: i32 = 1;
pub const WRONG_PENALTY_SECONDS: i32 = 2;

/// Best-scores key.
pub const GAME_ID: &str = "quick-maths";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Op {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub a: i64,
    pub op: Op,
    pub b: i64,
    pub answer: i64,
}

impl Problem {
    pub fn display(&self) -> String {
        let op = match self.op {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
        };
        format!("{} {} {} = ?", self.a, op, self.b)
    }
}

/// Subtraction never goes negative; multiplication stays in the 1..=10
/// times table.
pub fn generate_problem<R: Rng>(rng: &mut R) -> Problem {
    match rng.gen_range(0..3) {
        0 => {
            let a = rng.gen_range(0..50);
            let b = rng.gen_range(0..50);
            Problem { a, op: Op::Add, b, answer: a + b }
        }
        1 => {
            let a = rng.gen_range(10..60);
            let b = rng.gen_range(0..a);
            Problem { a, op: Op::Sub, b, answer: a - b }
        }
        _ => {
            let a = rng.gen_range(1..=10);
            let b = rng.gen_range(1..=10);
            Problem { a, op: Op::Mul, b, answer: a * b }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    GameOver,
}

#[derive(Debug)]
pub struct QuickMaths {
    pub score: u32,
    pub time_left: i32,
    pub problem: Problem,
    pub over: bool,
}

impl QuickMaths {
    pub fn start<R: Rng>(rng: &mut R) -> Self {
        Self {
            score: 0,
            time_left: ROUND_SECONDS,
            problem: generate_problem(rng),
            over: false,
        }
    }

    /// Submit an answer for the current problem. Correct answers score a
    /// point and buy a bonus second; wrong answers cost two.
    pub fn answer<R: Rng>(&mut self, rng: &mut R, value: i64) -> AnswerOutcome {
        if self.over {
            return AnswerOutcome::GameOver;
        }
        if value == self.problem.answer {
            self.score += 1;
            self.time_left += CORRECT_BONUS_SECONDS;
            self.problem = generate_problem(rng);
            AnswerOutcome::Correct
        } else {
            self.time_left -= WRONG_PENALTY_SECONDS;
            if self.time_left <= 0 {
                self.time_left = 0;
                self.over = true;
            }
            AnswerOutcome::Wrong
        }
    }

    /// One second of wall clock passes. Returns `true` when the round just
    /// ended.
    pub fn tick(&mut self) -> bool {
        if self.over {
            return false;
        }
        self.time_left -= 1;
        if self.time_left <= 0 {
            self.time_left = 0;
            self.over = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_problems_have_valid_answers() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let p = generate_problem(&mut rng);
            match p.op {
                Op::Add => assert_eq!(p.answer, p.a + p.b),
                Op::Sub => {
                    assert!(p.answer >= 0, "negative subtraction result");
                    assert_eq!(p.answer, p.a - p.b);
                }
                Op::Mul => {
                    assert!((1..=10).contains(&p.a) && (1..=10).contains(&p.b));
                    assert_eq!(p.answer, p.a * p.b);
                }
            }
        }
    }

    #[test]
    fn correct_answer_scores_and_buys_time() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut game = QuickMaths::start(&mut rng);
        let answer = game.problem.answer;
        assert_eq!(game.answer(&mut rng, answer), AnswerOutcome::Correct);
        assert_eq!(game.score, 1);
        assert_eq!(game.time_left, ROUND_SECONDS + 1);
    }

    #[test]
    fn wrong_answer_costs_two_seconds() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut game = QuickMaths::start(&mut rng);
        let wrong = game.problem.answer + 1;
        assert_eq!(game.answer(&mut rng, wrong), AnswerOutcome::Wrong);
        assert_eq!(game.score, 0);
        assert_eq!(game.time_left, ROUND_SECONDS - 2);
    }

    #[test]
    fn round_ends_at_zero() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut game = QuickMaths::start(&mut rng);
        for _ in 0..(ROUND_SECONDS - 1) {
            assert!(!game.tick());
        }
        assert!(game.tick());
        assert!(game.over);
        assert_eq!(game.answer(&mut rng, 0), AnswerOutcome::GameOver);
    }

    #[test]
    fn penalties_can_end_the_round() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut game = QuickMaths::start(&mut rng);
        game.time_left = 2;
        let wrong = game.problem.answer + 1;
        game.answer(&mut rng, wrong);
        assert!(game.over);
        assert_eq!(game.time_left, 0);
    }

    #[test]
    fn display_shape() {
        let p = Problem { a: 3, op: Op::Mul, b: 4, answer: 12 };
        assert_eq!(p.display(), "3 * 4 = ?");
    }
}
