//! Time-bounded visual cues.
//!
//! An effect is a tagged descriptor the renderer interprets: what it is,
//! where it is, and how far along it is. Optional observer callbacks can be
//! attached, but effects have no handle on gameplay state.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::shop::Skin;
use crate::Vector2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EffectKind {
    /// Ring shrinking onto newly spawned food
    FoodSpawn { scale_start: f32, scale_end: f32 },
    /// Body fading out after a fatal hit; the renderer staggers segments
    SnakeDeath { segments: Vec<Vector2>, stagger_ms: f64 },
    /// Rising "+N" over eaten food
    ScorePopup { points: u32 },
    CoinPopup { coins: u32 },
    DailyReward { coins: u32 },
    GameStart,
    SkinUnlocked { skin: Skin },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EffectId(u64);

type UpdateFn = Box<dyn FnMut(f32)>;
type CompleteFn = Box<dyn FnOnce()>;

/// A pending effect, built with [`Effect::new`] and handed to the scheduler
pub struct Effect {
    pub kind: EffectKind,
    pub position: Vector2,
    duration_ms: f64,
    elapsed_ms: f64,
    progress: f32,
    on_update: Option<UpdateFn>,
    on_complete: Option<CompleteFn>,
}

impl Effect {
    pub fn new(kind: EffectKind, position: Vector2, duration_ms: f64) -> Self {
        Self {
            kind,
            position,
            duration_ms,
            elapsed_ms: 0.0,
            progress: 0.0,
            on_update: None,
            on_complete: None,
        }
    }

    /// Called every update with the eased progress in `[0, 1]`
    pub fn on_update(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once, on the update that finishes the effect
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

/// Render-side view of a live effect
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub id: EffectId,
    pub kind: EffectKind,
    pub position: Vector2,
    pub progress: f32,
}

/// Quadratic ease-in-out on `[0, 1]`
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Default)]
pub struct EffectScheduler {
    effects: Vec<(EffectId, Effect)>,
    next_id: u64,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_effect(&mut self, effect: Effect) -> CoreResult<EffectId> {
        if !(effect.duration_ms.is_finite() && effect.duration_ms > 0.0) {
            return Err(CoreError::InvalidDuration(effect.duration_ms));
        }
        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.push((
            id,
            Effect {
                elapsed_ms: 0.0,
                progress: 0.0,
                ..effect
            },
        ));
        Ok(id)
    }

    /// Advance every effect by `dt_ms`. Finished effects fire `on_complete`
    /// and are dropped in the same call.
    pub fn update(&mut self, dt_ms: f64) {
        let mut finished = Vec::new();

        self.effects.retain_mut(|(_, effect)| {
            effect.elapsed_ms += dt_ms;
            let raw = (effect.elapsed_ms / effect.duration_ms).min(1.0);
            effect.progress = ease_in_out(raw as f32);

            if let Some(on_update) = effect.on_update.as_mut() {
                on_update(effect.progress);
            }

            if raw >= 1.0 {
                if let Some(on_complete) = effect.on_complete.take() {
                    finished.push(on_complete);
                }
                false
            } else {
                true
            }
        });

        for on_complete in finished {
            on_complete();
        }
    }

    pub fn active(&self) -> Vec<EffectView> {
        self.effects
            .iter()
            .map(|(id, effect)| EffectView {
                id: *id,
                kind: effect.kind.clone(),
                position: effect.position,
                progress: effect.progress,
            })
            .collect()
    }

    pub fn contains(&self, id: EffectId) -> bool {
        self.effects.iter().any(|(e, _)| *e == id)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
