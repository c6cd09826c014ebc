use rand::{rngs::StdRng, Rng, SeedableRng};
use tegridy_types::economy::DIE_FACES;

/// Source of die faces in `1..=DIE_FACES`.
pub trait DiceRoller {
    fn roll(&mut self) -> u8;
}

/// Uniform dice backed by a `rand` generator.
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible dice for local testing and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceRoller for RngDice<R> {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}
