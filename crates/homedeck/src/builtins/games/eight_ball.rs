//! Magic 8 ball.

use rand::Rng;

pub const ANSWERS: [&str; 20] = [
    "It is certain",
    "It is decidedly so",
    "Without a doubt",
    "Yes definitely",
    "You may rely on it",
    "As I see it, yes",
    "Most likely",
    "Outlook good",
    "Yes",
    "Signs point to yes",
    "Reply hazy, try again",
    "Ask again later",
    "Better not tell you now",
    "Cannot predict now",
    "Concentrate and ask again",
    "Don't count on it",
    "My reply is no",
    "My sources say no",
    "Outlook not so good",
    "Very doubtful",
];

pub fn shake<R: Rng>(rng: &mut R) -> &'static str {
    ANSWERS[rng.gen_range(0..ANSWERS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shake_returns_a_canonical_answer() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            assert!(ANSWERS.contains(&shake(&mut rng)));
        }
    }

    #[test]
    fn twenty_answers() {
        assert_eq!(ANSWERS.len(), 20);
    }
}
