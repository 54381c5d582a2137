use std::collections::VecDeque;

use crate::components::{dir, Vector2};
use crate::error::{CoreError, CoreResult};

/// The player's snake: ordered body, heading and growth state
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeEntity {
    /// Body segments, head at index 0
    segments: VecDeque<Vector2>,
    direction: Vector2,
    pending_growth: bool,
    /// Time banked towards the next movement tick
    move_accumulator_ms: f64,
}

impl SnakeEntity {
    /// Build a snake from an explicit body.
    ///
    /// Fails if the body is empty, if two consecutive segments are not
    /// orthogonal neighbours, or if `direction` is not a unit axis vector.
    pub fn new(segments: Vec<Vector2>, direction: Vector2) -> CoreResult<Self> {
        if segments.is_empty() {
            return Err(CoreError::EmptySnake);
        }
        if !dir::is_axis(direction) {
            return Err(CoreError::InvalidDirection(direction));
        }
        for (i, pair) in segments.windows(2).enumerate() {
            if !dir::is_axis(pair[1] - pair[0]) {
                return Err(CoreError::DetachedSegment {
                    index: i + 1,
                    at: pair[1],
                    previous: pair[0],
                });
            }
        }

        Ok(Self {
            segments: segments.into(),
            direction,
            pending_growth: false,
            move_accumulator_ms: 0.0,
        })
    }

    /// Straight snake of `length` cells trailing behind `head`
    pub fn spawn(head: Vector2, direction: Vector2, length: usize) -> CoreResult<Self> {
        let segments = (0..length as i32).map(|i| head - direction * i).collect();
        Self::new(segments, direction)
    }

    pub fn head(&self) -> Vector2 {
        self.segments[0]
    }

    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = Vector2> + '_ {
        self.segments.iter().copied()
    }

    pub fn segments_vec(&self) -> Vec<Vector2> {
        self.segments.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn occupies(&self, cell: Vector2) -> bool {
        self.segments.contains(&cell)
    }

    /// Request a new heading for the next move.
    ///
    /// Returns whether the request was accepted. A turn that would put the
    /// head straight back onto the neck is ignored, as is anything that is
    /// not one of the four axis directions.
    pub fn set_direction(&mut self, new_dir: Vector2) -> bool {
        if !dir::is_axis(new_dir) {
            log::trace!("ignoring non-axis direction {new_dir}");
            return false;
        }
        if self.segments.len() > 1 && self.head() + new_dir == self.segments[1] {
            log::trace!("ignoring reversal towards {new_dir}");
            return false;
        }
        self.direction = new_dir;
        true
    }

    /// Grow by one cell on the next move
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Advance the head one cell. Bounds and self-hits are left to the
    /// collision detector.
    pub fn step(&mut self) {
        let new_head = self.head() + self.direction;
        self.segments.push_front(new_head);

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.segments.pop_back();
        }
    }

    /// Bank `dt_ms` towards the movement tick. Returns true when a move is
    /// due; the remainder carries over to the next interval.
    pub fn advance(&mut self, dt_ms: f64, move_interval_ms: f64) -> bool {
        self.move_accumulator_ms += dt_ms;
        if self.move_accumulator_ms >= move_interval_ms {
            self.move_accumulator_ms -= move_interval_ms;
            true
        } else {
            false
        }
    }

    pub fn move_accumulator_ms(&self) -> f64 {
        self.move_accumulator_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_snake() -> SnakeEntity {
        SnakeEntity::new(
            vec![Vector2::new(10, 10), Vector2::new(9, 10), Vector2::new(8, 10)],
            dir::RIGHT,
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_builds_straight_body() {
        let snake = SnakeEntity::spawn(Vector2::new(10, 10), dir::RIGHT, 3).unwrap();
        assert_eq!(snake, scenario_snake());
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            SnakeEntity::new(vec![], dir::RIGHT),
            Err(CoreError::EmptySnake)
        );
        assert_eq!(
            SnakeEntity::new(vec![Vector2::new(1, 1)], Vector2::new(1, 1)),
            Err(CoreError::InvalidDirection(Vector2::new(1, 1)))
        );
        assert!(matches!(
            SnakeEntity::new(vec![Vector2::new(1, 1), Vector2::new(3, 1)], dir::RIGHT),
            Err(CoreError::DetachedSegment { index: 1, .. })
        ));
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = scenario_snake();
        for _ in 0..5 {
            let before = snake.len();
            snake.step();
            assert_eq!(snake.len(), before);
        }
        assert_eq!(snake.head(), Vector2::new(15, 10));
    }

    #[test]
    fn test_grow_adds_exactly_one_segment() {
        let mut snake = scenario_snake();
        snake.grow();
        assert_eq!(snake.len(), 3, "growth is deferred to the next move");

        snake.step();
        assert_eq!(snake.len(), 4);
        assert!(!snake.has_pending_growth());

        snake.step();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut snake = scenario_snake();
        assert!(!snake.set_direction(dir::LEFT));
        snake.step();
        assert_eq!(snake.head(), Vector2::new(11, 10));
    }

    #[test]
    fn test_reversal_tracks_last_move() {
        let mut snake = scenario_snake();
        assert!(snake.set_direction(dir::UP));
        // Not yet moved: the neck is still to the left
        assert!(!snake.set_direction(dir::LEFT));
        snake.step();
        // Moved up: down is now the reversal, left is fine
        assert!(!snake.set_direction(dir::DOWN));
        assert!(snake.set_direction(dir::LEFT));
    }

    #[test]
    fn test_single_segment_may_reverse() {
        let mut snake = SnakeEntity::new(vec![Vector2::new(5, 5)], dir::RIGHT).unwrap();
        assert!(snake.set_direction(dir::LEFT));
        snake.step();
        assert_eq!(snake.head(), Vector2::new(4, 5));
    }

    #[test]
    fn test_non_axis_direction_ignored() {
        let mut snake = scenario_snake();
        assert!(!snake.set_direction(Vector2::new(1, 1)));
        assert!(!snake.set_direction(Vector2::ZERO));
        assert_eq!(snake.direction(), dir::RIGHT);
    }

    #[test]
    fn test_advance_carries_remainder() {
        let mut snake = scenario_snake();
        assert!(!snake.advance(60.0, 100.0));
        assert!(snake.advance(60.0, 100.0));
        assert!((snake.move_accumulator_ms() - 20.0).abs() < 1e-9);
        assert!(!snake.advance(60.0, 100.0));
        assert!(snake.advance(30.0, 100.0));
    }

    #[test]
    fn test_segments_stay_adjacent_through_turns() {
        let mut snake = scenario_snake();
        snake.grow();
        for turn in [dir::UP, dir::LEFT, dir::DOWN, dir::LEFT, dir::UP] {
            snake.set_direction(turn);
            snake.step();
            let body = snake.segments_vec();
            for pair in body.windows(2) {
                assert!(dir::is_axis(pair[1] - pair[0]));
            }
        }
    }
}
