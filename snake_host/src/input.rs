//! Keyboard-style input handling

use anyhow::{bail, Result};
use snake_core::{dir, Vector2};

/// Map a key name to the direction it requests
pub fn direction_for_key(key: &str) -> Option<Vector2> {
    match key {
        "ArrowUp" | "w" | "W" => Some(dir::UP),
        "ArrowDown" | "s" | "S" => Some(dir::DOWN),
        "ArrowLeft" | "a" | "A" => Some(dir::LEFT),
        "ArrowRight" | "d" | "D" => Some(dir::RIGHT),
        _ => None,
    }
}

/// Pre-recorded presses, one per movement tick. `.` skips a tick.
#[derive(Debug, Clone)]
pub struct KeyScript {
    presses: Vec<Option<Vector2>>,
    next: usize,
}

impl KeyScript {
    pub fn parse(script: &str) -> Result<Self> {
        let mut presses = Vec::new();
        for c in script.chars().filter(|c| !c.is_whitespace()) {
            if c == '.' {
                presses.push(None);
                continue;
            }
            match direction_for_key(c.encode_utf8(&mut [0; 4])) {
                Some(direction) => presses.push(Some(direction)),
                None => bail!("unknown key '{c}' in script (use w/a/s/d or '.')"),
            }
        }
        Ok(Self { presses, next: 0 })
    }

    /// The press for the coming tick; `None` once the script ran out
    pub fn next_press(&mut self) -> Option<Option<Vector2>> {
        let press = self.presses.get(self.next).copied()?;
        self.next += 1;
        Some(press)
    }
}
