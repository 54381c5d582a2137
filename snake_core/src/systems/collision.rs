use hecs::Entity;
use serde::Serialize;

use crate::components::in_grid;
use crate::map::ArenaObject;
use crate::snake::SnakeEntity;

/// Outcome of testing the snake head against the arena.
///
/// `SelfHit` and `Wall` are fatal and carry no object. `Object` names the
/// entity whose bounds contain the head so the caller can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    Clear,
    SelfHit,
    Wall,
    Object(Entity),
}

impl CollisionResult {
    pub fn has_collision(&self) -> bool {
        !matches!(self, CollisionResult::Clear)
    }

    pub fn collided_with(&self) -> Option<Entity> {
        match self {
            CollisionResult::Object(entity) => Some(*entity),
            _ => None,
        }
    }
}

/// Collision category reported to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionKind {
    SelfHit,
    Wall,
    Food,
    Hazard,
}

impl CollisionKind {
    pub fn is_fatal(self) -> bool {
        !matches!(self, CollisionKind::Food)
    }
}

/// Check the snake head against its own body, the grid bounds and the given
/// objects, in that order. The first object whose bounds contain the head
/// wins.
pub fn check_collision(
    snake: &SnakeEntity,
    objects: &[ArenaObject],
    grid_size: i32,
) -> CollisionResult {
    let head = snake.head();

    // 1. Self
    if snake.segments().skip(1).any(|segment| segment == head) {
        return CollisionResult::SelfHit;
    }

    // 2. Walls
    if !in_grid(head, grid_size) {
        return CollisionResult::Wall;
    }

    // 3. External objects
    objects
        .iter()
        .find(|object| object.bounds.contains_cell(head))
        .map(|object| CollisionResult::Object(object.entity))
        .unwrap_or(CollisionResult::Clear)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{dir, Vector2};
    use crate::map::{Aabb, Arena};

    fn snake_at(cells: &[(i32, i32)], heading: Vector2) -> SnakeEntity {
        SnakeEntity::new(
            cells.iter().map(|&(x, y)| Vector2::new(x, y)).collect(),
            heading,
        )
        .unwrap()
    }

    #[test]
    fn test_clear_when_nothing_hit() {
        let snake = snake_at(&[(10, 10), (9, 10), (8, 10)], dir::RIGHT);
        let result = check_collision(&snake, &[], 20);
        assert_eq!(result, CollisionResult::Clear);
        assert!(!result.has_collision());
    }

    #[test]
    fn test_wall_collision_has_no_object() {
        let mut snake = snake_at(&[(0, 5), (1, 5)], dir::LEFT);
        snake.step();
        assert_eq!(snake.head(), Vector2::new(-1, 5));

        let result = check_collision(&snake, &[], 20);
        assert_eq!(result, CollisionResult::Wall);
        assert!(result.has_collision());
        assert!(result.collided_with().is_none());
    }

    #[test]
    fn test_far_walls() {
        let snake = snake_at(&[(20, 3)], dir::RIGHT);
        assert_eq!(check_collision(&snake, &[], 20), CollisionResult::Wall);
        let snake = snake_at(&[(3, 20)], dir::DOWN);
        assert_eq!(check_collision(&snake, &[], 20), CollisionResult::Wall);
        let snake = snake_at(&[(19, 19)], dir::DOWN);
        assert_eq!(check_collision(&snake, &[], 20), CollisionResult::Clear);
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) sits on the last segment of a closed loop
        let snake = snake_at(&[(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)], dir::UP);
        assert_eq!(check_collision(&snake, &[], 20), CollisionResult::SelfHit);
    }

    #[test]
    fn test_self_collision_reported_before_objects() {
        let mut arena = Arena::new(&[]);
        arena.place_food(Vector2::new(5, 5));
        let snake = snake_at(&[(5, 5), (5, 6), (6, 6), (6, 5), (5, 5)], dir::UP);
        assert_eq!(
            check_collision(&snake, &arena.objects(), 20),
            CollisionResult::SelfHit
        );
    }

    #[test]
    fn test_object_hit_reports_entity() {
        let mut arena = Arena::new(&[]);
        let food = arena.place_food(Vector2::new(11, 10));
        let mut snake = snake_at(&[(10, 10), (9, 10), (8, 10)], dir::RIGHT);
        snake.step();

        let result = check_collision(&snake, &arena.objects(), 20);
        assert_eq!(result, CollisionResult::Object(food));
        assert_eq!(result.collided_with(), Some(food));
    }

    #[test]
    fn test_first_object_in_order_wins() {
        let mut world = hecs::World::new();
        let first = world.spawn(());
        let second = world.spawn(());
        let cell = Vector2::new(3, 3);
        let objects = [
            ArenaObject {
                entity: first,
                bounds: Aabb::from_cell(cell),
            },
            ArenaObject {
                entity: second,
                bounds: Aabb::from_cell(cell),
            },
        ];
        let snake = snake_at(&[(3, 3)], dir::UP);
        assert_eq!(
            check_collision(&snake, &objects, 20),
            CollisionResult::Object(first)
        );
    }

    #[test]
    fn test_only_food_is_not_fatal() {
        assert!(!CollisionKind::Food.is_fatal());
        assert!(CollisionKind::Hazard.is_fatal());
        assert!(CollisionKind::Wall.is_fatal());
        assert!(CollisionKind::SelfHit.is_fatal());
    }
}
