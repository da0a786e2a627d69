use rand::seq::SliceRandom;
use serenity::model::id::UserId;

use crate::commands::giveaway::strategies::base::{DrawOptions, WinnerStrategy};

// Uniform sampling without replacement.
#[derive(Debug, Default)]
pub struct RandomSampleStrategy;

impl RandomSampleStrategy {
    pub fn new() -> Self {
        RandomSampleStrategy {}
    }
}

impl WinnerStrategy for RandomSampleStrategy {
    fn select(&self, options: &DrawOptions) -> Vec<UserId> {
        let mut rng = rand::thread_rng();
        options
            .participants()
            .choose_multiple(&mut rng, options.winners_to_draw())
            .copied()
            .collect()
    }
}
