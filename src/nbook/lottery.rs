//! The lottery easter egg: a pseudo-random draw from a fixed prize list.

use chrono::NaiveDate;
use rand::Rng;
use std::fmt;

pub const PRIZES: [&str; 8] = [
    "Toyota Supra '97",
    "Trip to the ♂Gym♂",
    "Anime Dakimakura Pillow",
    "20 mg. of anti-matter",
    "Violent clock",
    "Beard oil",
    "Pocket universe 2.0",
    "♂Dungeon master's♂ phone number",
];

/// Chance of winning anything at all: 8 prizes out of 20 tickets.
pub const DEFAULT_WIN_ODDS: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    Won(&'static str),
    Lost,
}

/// Draws with the given winning probability. Out-of-range odds are clamped
/// to `[0, 1]`; non-finite odds fall back to [`DEFAULT_WIN_ODDS`].
pub fn draw_with_odds<R: Rng + ?Sized>(rng: &mut R, odds: f64) -> Draw {
    let odds = if odds.is_finite() {
        odds.clamp(0.0, 1.0)
    } else {
        DEFAULT_WIN_ODDS
    };
    if rng.gen_bool(odds) {
        Draw::Won(PRIZES[rng.gen_range(0..PRIZES.len())])
    } else {
        Draw::Lost
    }
}

pub fn draw(odds: f64) -> Draw {
    draw_with_odds(&mut rand::thread_rng(), odds)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryOutcome {
    pub date: NaiveDate,
    pub draw: Draw,
}

impl fmt::Display for LotteryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today is {}", self.date.format("%d/%m/%Y"))?;
        match self.draw {
            Draw::Won(prize) => write!(
                f,
                "You won our lottery and your prize is... {}. Congrats!",
                prize
            ),
            Draw::Lost => write!(
                f,
                "You lose our lottery, but don't get upset! You can try again!"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_odds_never_wins() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(draw_with_odds(&mut rng, 0.0), Draw::Lost);
        }
    }

    #[test]
    fn certain_odds_always_wins_a_listed_prize() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            match draw_with_odds(&mut rng, 1.0) {
                Draw::Won(prize) => assert!(PRIZES.contains(&prize)),
                Draw::Lost => panic!("odds of 1.0 must always win"),
            }
        }
    }

    #[test]
    fn odds_are_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_with_odds(&mut rng, -3.0), Draw::Lost);
        assert!(matches!(draw_with_odds(&mut rng, 12.0), Draw::Won(_)));
    }

    #[test]
    fn nan_odds_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let _ = draw_with_odds(&mut rng, f64::NAN);
    }

    #[test]
    fn default_odds_win_roughly_forty_percent() {
        let mut rng = StdRng::seed_from_u64(42);
        let wins = (0..10_000)
            .filter(|_| matches!(draw_with_odds(&mut rng, DEFAULT_WIN_ODDS), Draw::Won(_)))
            .count();
        assert!((3_500..4_500).contains(&wins), "wins = {}", wins);
    }

    #[test]
    fn outcome_message() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let won = LotteryOutcome {
            date,
            draw: Draw::Won("Beard oil"),
        };
        assert_eq!(
            won.to_string(),
            "Today is 09/03/2024\nYou won our lottery and your prize is... Beard oil. Congrats!"
        );

        let lost = LotteryOutcome {
            date,
            draw: Draw::Lost,
        };
        assert!(lost.to_string().ends_with("You can try again!"));
    }
}
