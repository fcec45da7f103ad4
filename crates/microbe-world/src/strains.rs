//! Reference species.

use crate::species::{Senses, Species};
use microbe_core::{Direction, Position};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Never moves; lives off whatever lands on its cell
#[derive(Debug, Clone, Default)]
pub struct Sessile;

impl Species for Sessile {
    fn name(&self) -> &str {
        "Sessile"
    }

    fn step(&mut self, from: Position, _senses: &Senses<'_>, _rng: &mut ChaCha8Rng) -> Position {
        from
    }

    fn offspring(&self) -> Box<dyn Species> {
        Box::new(Sessile)
    }
}

/// Random walk: one step in one of the eight directions each tick
#[derive(Debug, Clone, Default)]
pub struct Wanderer;

impl Species for Wanderer {
    fn name(&self) -> &str {
        "Wanderer"
    }

    fn step(&mut self, from: Position, _senses: &Senses<'_>, rng: &mut ChaCha8Rng) -> Position {
        from.step(Direction::random(rng))
    }

    fn offspring(&self) -> Box<dyn Species> {
        Box::new(Wanderer)
    }
}

/// Steps onto an adjacent cell with food when it sees one, otherwise wanders
#[derive(Debug, Clone, Default)]
pub struct Forager {
    /// Last direction that led to food
    heading: Option<Direction>,
}

impl Species for Forager {
    fn name(&self) -> &str {
        "Forager"
    }

    fn step(&mut self, from: Position, senses: &Senses<'_>, rng: &mut ChaCha8Rng) -> Position {
        if let Some(heading) = self.heading {
            if senses.has_food_at(from.step(heading)) {
                return from.step(heading);
            }
        }

        let mut directions = Direction::all();
        directions.shuffle(rng);
        match directions
            .into_iter()
            .find(|&direction| senses.has_food_at(from.step(direction)))
        {
            Some(direction) => {
                self.heading = Some(direction);
                from.step(direction)
            }
            None => {
                self.heading = None;
                from.step(Direction::random(rng))
            }
        }
    }

    fn offspring(&self) -> Box<dyn Species> {
        Box::new(Forager::default())
    }
}
