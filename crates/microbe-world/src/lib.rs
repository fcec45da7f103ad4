//! Organism lifecycle over a shared food grid.
//!
//! An [`Organism`] ages, pays health for every cell it moves, feeds on the
//! food source and signals when it may reproduce. Movement is delegated to a
//! [`Species`]; everything else is shared lifecycle logic.

pub mod food;
pub mod organism;
pub mod species;
pub mod strains;

pub use food::{share, FoodGrid, FoodSource, SharedFood};
pub use organism::{DeathCause, Organism, OrganismSnapshot, Vitals};
pub use species::{Senses, Species};
pub use strains::{Forager, Sessile, Wanderer};
