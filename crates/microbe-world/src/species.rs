//! Species hooks: the only behaviour an organism delegates.

use crate::food::FoodSource;
use crate::organism::Vitals;
use microbe_core::{LifecycleConfig, Position};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Read-only view of the food source handed to movement rules
pub struct Senses<'a> {
    food: &'a dyn FoodSource,
}

impl<'a> Senses<'a> {
    pub fn new(food: &'a dyn FoodSource) -> Self {
        Self { food }
    }

    pub fn has_food_at(&self, pos: Position) -> bool {
        self.food.is_food(pos)
    }
}

/// Behaviour that varies per species.
///
/// Feeding, ageing, health cost and fertility are not part of this trait;
/// [`crate::Organism::run`] owns them and calls into the species only to move.
pub trait Species: fmt::Debug + Send + Sync {
    /// Display name of the species
    fn name(&self) -> &str;

    /// Where the organism goes this tick, starting from `from`.
    fn step(&mut self, from: Position, senses: &Senses<'_>, rng: &mut ChaCha8Rng) -> Position;

    /// A fresh instance of the same species for a newborn
    fn offspring(&self) -> Box<dyn Species>;

    /// Initial vitals of a newborn of this species.
    fn newborn_vitals(&self, config: &LifecycleConfig, rng: &mut ChaCha8Rng) -> Vitals {
        Vitals::randomized(config, rng)
    }
}
