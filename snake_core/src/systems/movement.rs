use crate::snake::SnakeEntity;
use crate::systems::input::InputSource;

/// Run the snake's movement cadence for one simulation step.
///
/// Banks `dt_ms` on the snake's move timer; when a movement tick is due the
/// buffered input is consumed (once), applied, and the snake advances one
/// cell. Returns whether the snake moved.
pub fn move_snake(
    snake: &mut SnakeEntity,
    input: &mut dyn InputSource,
    dt_ms: f64,
    move_interval_ms: f64,
) -> bool {
    if !snake.advance(dt_ms, move_interval_ms) {
        return false;
    }

    if let Some(direction) = input.current_direction() {
        snake.set_direction(direction);
    }
    snake.step();
    true
}
