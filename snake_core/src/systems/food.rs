use rand::Rng;

use crate::resources::GameRng;
use crate::Vector2;

/// Picks food cells uniformly from the free part of the grid
pub struct FoodSpawner {
    grid_size: i32,
    rng: GameRng,
}

impl FoodSpawner {
    pub fn new(grid_size: i32, rng: GameRng) -> Self {
        Self { grid_size, rng }
    }

    /// Uniformly random cell, occupied or not
    pub fn random_cell(&mut self) -> Vector2 {
        Vector2::new(
            self.rng.0.gen_range(0..self.grid_size),
            self.rng.0.gen_range(0..self.grid_size),
        )
    }

    /// Sample until a cell outside `occupied` comes up.
    ///
    /// There is no retry limit: if `occupied` covers the whole grid this
    /// never returns, so callers must keep at least one cell free.
    pub fn generate_valid_food(&mut self, occupied: &[Vector2]) -> Vector2 {
        loop {
            let cell = self.random_cell();
            if !occupied.contains(&cell) {
                return cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_food_stays_on_grid() {
        let mut spawner = FoodSpawner::new(20, GameRng::new(1));
        for _ in 0..500 {
            let cell = spawner.random_cell();
            assert!((0..20).contains(&cell.x) && (0..20).contains(&cell.y));
        }
    }

    #[test]
    fn test_food_never_on_occupied_cell() {
        // Randomised occupied sets of every density short of a full grid
        let grid = 8;
        let mut picker = rand::rngs::StdRng::seed_from_u64(99);
        let mut spawner = FoodSpawner::new(grid, GameRng::new(3));

        for round in 0..200 {
            let target = picker.gen_range(0..(grid * grid) as usize);
            let mut occupied = HashSet::new();
            while occupied.len() < target {
                occupied.insert(Vector2::new(
                    picker.gen_range(0..grid),
                    picker.gen_range(0..grid),
                ));
            }
            let occupied: Vec<Vector2> = occupied.into_iter().collect();

            let food = spawner.generate_valid_food(&occupied);
            assert!(
                !occupied.contains(&food),
                "round {round}: food {food} landed on an occupied cell"
            );
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let grid = 4;
        let free = Vector2::new(2, 1);
        let occupied: Vec<Vector2> = (0..grid)
            .flat_map(|y| (0..grid).map(move |x| Vector2::new(x, y)))
            .filter(|&cell| cell != free)
            .collect();

        let mut spawner = FoodSpawner::new(grid, GameRng::new(5));
        assert_eq!(spawner.generate_valid_food(&occupied), free);
    }

    #[test]
    fn test_same_seed_same_food() {
        let occupied = [Vector2::new(10, 10)];
        let mut a = FoodSpawner::new(20, GameRng::new(42));
        let mut b = FoodSpawner::new(20, GameRng::new(42));
        for _ in 0..10 {
            assert_eq!(
                a.generate_valid_food(&occupied),
                b.generate_valid_food(&occupied)
            );
        }
    }
}
