use snake_core::{dir, in_grid, Snapshot, Vector2};

/// Greedy steering: head for the food, never into a wall, hazard or body
/// cell when a safe move exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Direction to request for the next movement tick
    pub fn choose(&self, snapshot: &Snapshot) -> Option<Vector2> {
        let head = *snapshot.segments.first()?;
        let neck = snapshot.segments.get(1).copied();

        // Current heading first so ties keep going straight
        let mut candidates = vec![snapshot.direction];
        candidates.extend(
            [dir::UP, dir::RIGHT, dir::DOWN, dir::LEFT]
                .into_iter()
                .filter(|&d| d != snapshot.direction),
        );

        candidates
            .into_iter()
            .filter(|&d| Some(head + d) != neck)
            .map(|d| {
                let cell = head + d;
                let distance = snapshot
                    .food
                    .map(|food| (food - cell).abs().element_sum())
                    .unwrap_or(0);
                (d, is_safe(snapshot, cell), distance)
            })
            .min_by_key(|&(_, safe, distance)| (!safe, distance))
            .map(|(d, _, _)| d)
    }
}

fn is_safe(snapshot: &Snapshot, cell: Vector2) -> bool {
    // The tail usually moves away, but a growing snake keeps it
    in_grid(cell, snapshot.grid_size) && !snapshot.hazards.contains(&cell) && !snapshot.segments.contains(&cell)
}
