use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::components::{dir, in_grid};
use crate::error::{CoreError, CoreResult};
use crate::params::Params;
use crate::Vector2;

/// Difficulty level, selects snake speed and coin multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Cells per tenth of a second
    pub fn snake_speed(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.2,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn score_multiplier(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Milliseconds between two movement ticks
    pub fn move_interval_ms(self) -> f64 {
        1000.0 / (self.snake_speed() * 10.0)
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_size: i32,
    pub initial_snake_length: usize,
    pub score_per_food: u32,
    pub combo_timeout_ms: f64,
    pub time_step_ms: f64,
    /// Static obstacle cells; touching one ends the round
    pub hazards: Vec<Vector2>,
    pub rng_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: Params::GRID_SIZE,
            initial_snake_length: Params::INITIAL_SNAKE_LENGTH,
            score_per_food: Params::SCORE_PER_FOOD,
            combo_timeout_ms: Params::COMBO_TIMEOUT_MS,
            time_step_ms: Params::TIME_STEP_MS,
            hazards: Vec::new(),
            rng_seed: 12345,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a custom grid size
    pub fn with_grid_size(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Head cell of a freshly spawned snake
    pub fn spawn_head(&self) -> Vector2 {
        Vector2::new(self.grid_size / 2, self.grid_size / 2)
    }

    /// Body cells of a freshly spawned snake, head first, heading right
    pub fn spawn_cells(&self) -> Vec<Vector2> {
        let head = self.spawn_head();
        (0..self.initial_snake_length as i32)
            .map(|i| head - dir::RIGHT * i)
            .collect()
    }

    pub fn in_bounds(&self, cell: Vector2) -> bool {
        in_grid(cell, self.grid_size)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_size <= 0 {
            return Err(CoreError::InvalidGridSize(self.grid_size));
        }
        if self.initial_snake_length == 0 {
            return Err(CoreError::EmptySnake);
        }
        // The spawned body extends left from the centre column
        if self.initial_snake_length as i32 > self.grid_size / 2 + 1 {
            return Err(CoreError::SnakeTooLong {
                grid: self.grid_size,
                length: self.initial_snake_length,
            });
        }
        if !(self.time_step_ms.is_finite() && self.time_step_ms > 0.0) {
            return Err(CoreError::InvalidTimeStep(self.time_step_ms));
        }
        self.validate_hazards()
    }

    /// Hazards must sit on the grid, clear of the spawned snake, and leave
    /// at least one cell for food
    fn validate_hazards(&self) -> CoreResult<()> {
        let body = self.spawn_cells();
        let mut blocked: HashSet<Vector2> = body.iter().copied().collect();
        for &hazard in &self.hazards {
            if !self.in_bounds(hazard) {
                return Err(CoreError::HazardOutOfBounds(hazard));
            }
            if body.contains(&hazard) {
                return Err(CoreError::HazardOnSnake(hazard));
            }
            blocked.insert(hazard);
        }

        let cells = self.grid_size as usize * self.grid_size as usize;
        if blocked.len() >= cells {
            return Err(CoreError::NoFreeCell {
                grid: self.grid_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.spawn_head(), Vector2::new(10, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_move_interval_per_difficulty() {
        assert_eq!(Difficulty::Easy.move_interval_ms(), 125.0);
        assert!((Difficulty::Normal.move_interval_ms() - 83.333).abs() < 0.01);
        assert_eq!(Difficulty::Hard.move_interval_ms(), 50.0);
    }

    #[test]
    fn test_in_bounds() {
        let config = Config::new();
        assert!(config.in_bounds(Vector2::new(0, 0)));
        assert!(config.in_bounds(Vector2::new(19, 19)));
        assert!(!config.in_bounds(Vector2::new(-1, 5)));
        assert!(!config.in_bounds(Vector2::new(20, 0)));
        assert!(!config.in_bounds(Vector2::new(0, 20)));
    }

    #[test]
    fn test_validate_rejects_bad_grid() {
        let config = Config::with_grid_size(0);
        assert_eq!(config.validate(), Err(CoreError::InvalidGridSize(0)));

        let mut config = Config::with_grid_size(4);
        config.initial_snake_length = 5;
        assert!(matches!(
            config.validate(),
            Err(CoreError::SnakeTooLong { .. })
        ));
    }

    #[test]
    fn test_spawn_cells_extend_left_of_head() {
        let config = Config::new();
        assert_eq!(
            config.spawn_cells(),
            vec![Vector2::new(10, 10), Vector2::new(9, 10), Vector2::new(8, 10)]
        );
    }

    #[test]
    fn test_validate_rejects_hazard_off_grid() {
        let mut config = Config::new();
        config.hazards = vec![Vector2::new(3, 3), Vector2::new(50, 50)];
        assert_eq!(
            config.validate(),
            Err(CoreError::HazardOutOfBounds(Vector2::new(50, 50)))
        );
    }

    #[test]
    fn test_validate_rejects_hazard_on_spawn_body() {
        let mut config = Config::new();
        config.hazards = vec![Vector2::new(9, 10)];
        assert_eq!(
            config.validate(),
            Err(CoreError::HazardOnSnake(Vector2::new(9, 10)))
        );
    }

    #[test]
    fn test_validate_requires_a_free_cell() {
        let mut config = Config::with_grid_size(4);
        let body = config.spawn_cells();
        let all_free: Vec<Vector2> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Vector2::new(x, y)))
            .filter(|cell| !body.contains(cell))
            .collect();
        assert_eq!(all_free.len(), 13);

        config.hazards = all_free.clone();
        assert_eq!(config.validate(), Err(CoreError::NoFreeCell { grid: 4 }));

        // Duplicates do not count twice
        config.hazards = all_free[1..].to_vec();
        config.hazards.push(all_free[1]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"grid_size": 12}"#).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.score_per_food, 10);
        assert!(config.hazards.is_empty());
    }
}
