use glam::IVec2;

/// Grid cell coordinate, compared component-wise
pub type Vector2 = IVec2;

/// The four axis directions a snake can travel (y grows downwards)
pub mod dir {
    use super::Vector2;

    pub const UP: Vector2 = Vector2::new(0, -1);
    pub const DOWN: Vector2 = Vector2::new(0, 1);
    pub const LEFT: Vector2 = Vector2::new(-1, 0);
    pub const RIGHT: Vector2 = Vector2::new(1, 0);

    /// True for exactly the four unit axis vectors
    pub fn is_axis(d: Vector2) -> bool {
        d.x.abs() + d.y.abs() == 1
    }
}

/// True when `cell` lies inside a square grid of `grid_size` cells
pub fn in_grid(cell: Vector2, grid_size: i32) -> bool {
    cell.x >= 0 && cell.x < grid_size && cell.y >= 0 && cell.y < grid_size
}

/// Grid cell occupied by an arena entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell(pub Vector2);

/// Marker for the single active food entity
#[derive(Debug, Clone, Copy, Default)]
pub struct Food;

/// Marker for a static obstacle
#[derive(Debug, Clone, Copy, Default)]
pub struct Hazard;

/// What kind of arena object the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Food,
    Hazard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_directions() {
        assert!(dir::is_axis(dir::UP));
        assert!(dir::is_axis(dir::LEFT));
        assert!(!dir::is_axis(Vector2::ZERO));
        assert!(!dir::is_axis(Vector2::new(1, 1)));
        assert!(!dir::is_axis(Vector2::new(2, 0)));
        assert_eq!(-dir::RIGHT, dir::LEFT);
        assert_eq!(-dir::UP, dir::DOWN);
    }

    #[test]
    fn test_in_grid() {
        assert!(in_grid(Vector2::new(0, 0), 20));
        assert!(in_grid(Vector2::new(19, 19), 20));
        assert!(!in_grid(Vector2::new(-1, 5), 20));
        assert!(!in_grid(Vector2::new(20, 0), 20));
        assert!(!in_grid(Vector2::new(0, 20), 20));
    }

    #[test]
    fn test_cell_arithmetic_is_exact() {
        let head = Vector2::new(10, 10);
        assert_eq!(head + dir::RIGHT, Vector2::new(11, 10));
        assert_eq!(head + dir::UP, Vector2::new(10, 9));
    }
}
