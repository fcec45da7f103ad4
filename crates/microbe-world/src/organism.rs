//! Organism state and the per-tick lifecycle.

use crate::food::SharedFood;
use crate::species::{Senses, Species};
use microbe_core::{Color, LifecycleConfig, OrganismId, Position, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Counters that drive life, death and reproduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    /// Remaining lifespan in ticks
    pub age: i32,
    /// May go negative before the death check
    pub health: i32,
    /// Moving ticks left before the organism may reproduce
    pub reproduction_timer: i32,
}

impl Vitals {
    /// Draw vitals uniformly from the configured ranges.
    ///
    /// `config` must have passed [`LifecycleConfig::validate`].
    pub fn randomized<R: Rng + ?Sized>(config: &LifecycleConfig, rng: &mut R) -> Self {
        Self {
            age: config.base_life + rng.gen_range(0..config.max_life),
            health: config.base_health + rng.gen_range(0..config.max_health),
            reproduction_timer: config.reproduction_cycle
                + rng.gen_range(0..config.reproduction_jitter),
        }
    }

    /// Clamp the reproduction timer to zero; a negative timer would never
    /// count down to fertility
    fn settled(self) -> Self {
        Self {
            reproduction_timer: self.reproduction_timer.max(0),
            ..self
        }
    }
}

/// Why an organism is dead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Starvation,
    OldAge,
}

/// A single organism on the shared food source
pub struct Organism {
    id: OrganismId,
    position: Position,
    color: Color,
    vitals: Vitals,
    species: Box<dyn Species>,
    food: SharedFood,
    config: Arc<LifecycleConfig>,
    rng: ChaCha8Rng,
}

impl Organism {
    /// Create an organism with the default lifecycle constants
    pub fn new(
        species: Box<dyn Species>,
        position: Position,
        color: Color,
        food: SharedFood,
        seed: u64,
    ) -> Self {
        Self::build(
            species,
            position,
            color,
            food,
            Arc::new(LifecycleConfig::default()),
            seed,
        )
    }

    /// Create an organism with custom lifecycle constants
    pub fn with_config(
        species: Box<dyn Species>,
        position: Position,
        color: Color,
        food: SharedFood,
        config: Arc<LifecycleConfig>,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(species, position, color, food, config, seed))
    }

    fn build(
        species: Box<dyn Species>,
        position: Position,
        color: Color,
        food: SharedFood,
        config: Arc<LifecycleConfig>,
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let vitals = Vitals::randomized(&config, &mut rng);
        Self {
            id: OrganismId::from_rng(&mut rng),
            position,
            color,
            vitals,
            species,
            food,
            config,
            rng,
        }
    }

    /// Replace the randomized vitals. A negative reproduction timer is
    /// raised to zero.
    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.vitals = vitals.settled();
        self
    }

    /// Advance one tick: move, feed, age, pay for the movement.
    ///
    /// Does nothing once the organism is dead.
    pub fn run(&mut self) {
        if self.is_dead() {
            return;
        }

        let previous = self.position;
        self.position = {
            let food = self.food.read();
            let senses = Senses::new(&*food);
            self.species.step(previous, &senses, &mut self.rng)
        };

        self.feed();

        self.vitals.age -= 1;

        let effort = previous.manhattan_distance(&self.position);
        self.vitals.health = self.vitals.health.saturating_sub(effort);

        // stationary organisms do not approach fertility
        if self.vitals.reproduction_timer > 0 && effort != 0 {
            self.vitals.reproduction_timer -= 1;
        }

        if let Some(cause) = self.death_cause() {
            debug!(
                organism_id = %self.id,
                species = self.species.name(),
                ?cause,
                health = self.vitals.health,
                age = self.vitals.age,
                "Organism died"
            );
        }
    }

    fn feed(&mut self) {
        let mut food = self.food.write();
        if food.is_food(self.position) {
            food.eat_food(self.position);
            self.vitals.health = self.vitals.health.saturating_add(self.config.feed_gain);
            trace!(
                organism_id = %self.id,
                position = %self.position,
                health = self.vitals.health,
                "Organism fed"
            );
        }
    }

    pub fn has_food_here(&self) -> bool {
        self.has_food_at(self.position)
    }

    pub fn has_food_at(&self, pos: Position) -> bool {
        self.food.read().is_food(pos)
    }

    /// True once per reproductive cycle.
    ///
    /// A `true` result resets the timer, so the caller must spawn the
    /// offspring right away; the signal will not repeat until the timer has
    /// run down again through movement.
    pub fn is_fertile(&mut self) -> bool {
        if self.vitals.reproduction_timer == 0 && self.vitals.health > self.config.good_health {
            self.vitals.reproduction_timer = self.config.good_health;
            debug!(
                organism_id = %self.id,
                species = self.species.name(),
                health = self.vitals.health,
                "Organism fertile"
            );
            return true;
        }
        false
    }

    pub fn is_dead(&self) -> bool {
        self.vitals.health < 1 || self.vitals.age < 1
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        if self.vitals.health < 1 {
            Some(DeathCause::Starvation)
        } else if self.vitals.age < 1 {
            Some(DeathCause::OldAge)
        } else {
            None
        }
    }

    /// A newborn of the same species on the same cell.
    ///
    /// The child draws its own id and vitals; its random stream is seeded
    /// from the parent's so whole runs replay from the initial seeds.
    pub fn offspring(&mut self) -> Organism {
        let mut rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let species = self.species.offspring();
        let vitals = species.newborn_vitals(&self.config, &mut rng).settled();
        Organism {
            id: OrganismId::from_rng(&mut rng),
            position: self.position,
            color: self.color,
            vitals,
            species,
            food: Arc::clone(&self.food),
            config: Arc::clone(&self.config),
            rng,
        }
    }

    pub fn id(&self) -> OrganismId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn vitals(&self) -> Vitals {
        self.vitals
    }

    pub fn age(&self) -> i32 {
        self.vitals.age
    }

    pub fn health(&self) -> i32 {
        self.vitals.health
    }

    pub fn reproduction_timer(&self) -> i32 {
        self.vitals.reproduction_timer
    }

    pub fn species_name(&self) -> &str {
        self.species.name()
    }

    pub fn snapshot(&self) -> OrganismSnapshot {
        OrganismSnapshot::from(self)
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.species.name())
    }
}

impl fmt::Debug for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Organism")
            .field("id", &self.id)
            .field("species", &self.species)
            .field("position", &self.position)
            .field("color", &self.color)
            .field("vitals", &self.vitals)
            .finish_non_exhaustive()
    }
}

/// Serializable organism state for renderers and population managers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganismSnapshot {
    pub id: OrganismId,
    pub species: String,
    pub position: Position,
    pub color: Color,
    pub vitals: Vitals,
    pub alive: bool,
}

impl From<&Organism> for OrganismSnapshot {
    fn from(org: &Organism) -> Self {
        Self {
            id: org.id,
            species: org.species.name().to_string(),
            position: org.position,
            color: org.color,
            vitals: org.vitals,
            alive: !org.is_dead(),
        }
    }
}
