//! Text "renderer": reports what a screen would show through the log

use snake_core::{GameState, Renderer, Snapshot, Vector2};

pub struct LogRenderer {
    last_mode: Option<GameState>,
    last_score: u32,
    frames: u64,
    draw_board: bool,
}

impl LogRenderer {
    pub fn new(draw_board: bool) -> Self {
        Self {
            last_mode: None,
            last_score: 0,
            frames: 0,
            draw_board,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        self.frames += 1;

        if self.last_mode != Some(snapshot.mode) {
            log::info!(
                "[frame {}] {:?} | score {} best {} | coins {} | skin {}",
                self.frames,
                snapshot.mode,
                snapshot.score,
                snapshot.high_score,
                snapshot.currency,
                snapshot.current_skin
            );
            self.last_mode = Some(snapshot.mode);
        }

        if snapshot.score != self.last_score {
            log::debug!(
                "[frame {}] score {} (combo x{}), length {}",
                self.frames,
                snapshot.score,
                snapshot.combo,
                snapshot.segments.len()
            );
            self.last_score = snapshot.score;
        }

        if self.draw_board && log::log_enabled!(log::Level::Trace) {
            log::trace!("\n{}", board(snapshot));
        }
    }
}

/// ASCII picture of the grid: `@` head, `o` body, `*` food, `#` hazard
pub fn board(snapshot: &Snapshot) -> String {
    let size = snapshot.grid_size;
    let mut out = String::with_capacity(((size + 1) * size) as usize);

    for y in 0..size {
        for x in 0..size {
            let cell = Vector2::new(x, y);
            let c = if snapshot.segments.first() == Some(&cell) {
                '@'
            } else if snapshot.segments.contains(&cell) {
                'o'
            } else if snapshot.food == Some(cell) {
                '*'
            } else if snapshot.hazards.contains(&cell) {
                '#'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{dir, Settings, Skin};

    #[test]
    fn test_board_layout() {
        let snapshot = Snapshot {
            grid_size: 4,
            segments: vec![Vector2::new(2, 1), Vector2::new(1, 1)],
            direction: dir::RIGHT,
            food: Some(Vector2::new(3, 3)),
            hazards: vec![Vector2::new(0, 0)],
            score: 0,
            high_score: 0,
            combo: 0,
            mode: GameState::Playing,
            currency: 0,
            current_skin: Skin::Default,
            owned_skins: vec![Skin::Default],
            settings: Settings::default(),
            effects: Vec::new(),
        };

        assert_eq!(board(&snapshot), "#...\n.o@.\n....\n...*\n");

        let mut renderer = LogRenderer::new(true);
        renderer.draw(&snapshot);
        renderer.draw(&snapshot);
        assert_eq!(renderer.frames(), 2);
    }
}
