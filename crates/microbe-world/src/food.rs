//! Food source boundary and a reference toroidal food grid.

use microbe_core::{Error, FoodGridConfig, Position, Result};
use parking_lot::RwLock;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared food collaborator consulted by every organism in a tick.
pub trait FoodSource: Send + Sync {
    /// Whether the cell currently holds food. Must not mutate.
    fn is_food(&self, pos: Position) -> bool;

    /// Remove the food at the cell.
    fn eat_food(&mut self, pos: Position);
}

/// Handle shared between organisms. Writers hold the lock across
/// check-then-remove, so two organisms can never both eat one cell.
pub type SharedFood = Arc<RwLock<dyn FoodSource>>;

/// Wrap a food source into a shareable handle
pub fn share<F: FoodSource + 'static>(food: F) -> SharedFood {
    Arc::new(RwLock::new(food))
}

/// A 2D toroidal grid where each cell either holds food or not
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FoodGridData")]
pub struct FoodGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

/// Unchecked wire form of [`FoodGrid`]
#[derive(Deserialize)]
struct FoodGridData {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl TryFrom<FoodGridData> for FoodGrid {
    type Error = Error;

    fn try_from(data: FoodGridData) -> Result<Self> {
        let size = cell_count(data.width, data.height)?;
        if data.cells.len() != size {
            return Err(Error::Validation(format!(
                "expected {} cells for a {}x{} grid, got {}",
                size,
                data.width,
                data.height,
                data.cells.len()
            )));
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

fn cell_count(width: i32, height: i32) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(Error::Validation(format!(
            "grid dimensions must be positive, got {width}x{height}"
        )));
    }
    width
        .checked_mul(height)
        .map(|size| size as usize)
        .ok_or_else(|| Error::Validation(format!("grid {width}x{height} is too large")))
}

impl FoodGrid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let size = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; size],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Create a grid seeded with food according to `config.density`
    pub fn from_config(config: &FoodGridConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let mut grid = Self::new(config.width, config.height)?;
        for cell in &mut grid.cells {
            *cell = rng.gen::<f32>() < config.density;
        }
        Ok(grid)
    }

    pub fn place_food(&mut self, pos: Position) {
        let index = self.index(pos);
        self.cells[index] = true;
    }

    pub fn food_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    fn index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width, self.height);
        (wrapped.y * self.width + wrapped.x) as usize
    }
}

impl FoodSource for FoodGrid {
    fn is_food(&self, pos: Position) -> bool {
        self.cells[self.index(pos)]
    }

    fn eat_food(&mut self, pos: Position) {
        let index = self.index(pos);
        self.cells[index] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = FoodGrid::new(10, 10).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.cells.len(), 100);
        assert_eq!(grid.food_count(), 0);
    }

    #[test]
    fn test_place_and_eat() {
        let mut grid = FoodGrid::new(10, 10).unwrap();
        let pos = Position::new(3, 4);
        grid.place_food(pos);
        assert!(grid.is_food(pos));
        assert_eq!(grid.food_count(), 1);

        grid.eat_food(pos);
        assert!(!grid.is_food(pos));

        // eating an empty cell is harmless
        grid.eat_food(pos);
        assert_eq!(grid.food_count(), 0);
    }

    #[test]
    fn test_toroidal_wrapping() {
        let mut grid = FoodGrid::new(10, 10).unwrap();
        grid.place_food(Position::new(-1, -1));
        assert!(grid.is_food(Position::new(9, 9)));

        grid.place_food(Position::new(10, 10));
        assert!(grid.is_food(Position::new(0, 0)));
    }

    #[test]
    fn test_grid_from_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = FoodGridConfig {
            width: 20,
            height: 20,
            density: 0.5,
        };

        let grid = FoodGrid::from_config(&config, &mut rng).unwrap();
        let count = grid.food_count();
        assert!(count > 0);
        assert!(count < 400);

        let empty = FoodGrid::from_config(
            &FoodGridConfig {
                density: 0.0,
                ..config.clone()
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(empty.food_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = FoodGridConfig {
            width: -3,
            ..Default::default()
        };
        assert!(FoodGrid::from_config(&config, &mut rng).is_err());
    }

    #[test]
    fn test_degenerate_dimensions_are_rejected() {
        assert!(matches!(FoodGrid::new(0, 0), Err(Error::Validation(_))));
        assert!(matches!(FoodGrid::new(10, 0), Err(Error::Validation(_))));
        assert!(matches!(FoodGrid::new(-4, -4), Err(Error::Validation(_))));
        assert!(matches!(FoodGrid::new(i32::MAX, 2), Err(Error::Validation(_))));
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let result = serde_json::from_str::<FoodGrid>(r#"{"width":10,"height":10,"cells":[]}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<FoodGrid>(r#"{"width":0,"height":0,"cells":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_grid_serialization() {
        let mut grid = FoodGrid::new(3, 2).unwrap();
        grid.place_food(Position::new(2, 1));

        let json = serde_json::to_string(&grid).unwrap();
        let restored: FoodGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.width(), 3);
        assert!(restored.is_food(Position::new(2, 1)));
        assert_eq!(restored.food_count(), 1);
    }

    #[test]
    fn test_share_wraps_any_source() {
        let shared = share(FoodGrid::new(2, 2).unwrap());
        assert!(!shared.read().is_food(Position::new(0, 0)));
        shared.write().eat_food(Position::new(0, 0));
        assert!(!shared.read().is_food(Position::new(1, 1)));
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let grid = Arc::new(RwLock::new(FoodGrid::new(4, 4).unwrap()));
        let shared: SharedFood = grid.clone();
        grid.write().place_food(Position::new(1, 1));
        assert!(shared.read().is_food(Position::new(1, 1)));

        shared.write().eat_food(Position::new(1, 1));
        assert_eq!(grid.read().food_count(), 0);
    }
}
