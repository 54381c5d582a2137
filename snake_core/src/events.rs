//! Typed event bus.
//!
//! Components publish [`GameEvent`]s; any number of listeners subscribe per
//! [`EventKind`]. Listeners run synchronously, in subscription order, inside
//! the tick that produced the event.

use serde::Serialize;

use crate::fsm::GameState;
use crate::progress::Achievement;
use crate::shop::Skin;
use crate::systems::collision::CollisionKind;
use crate::Vector2;

/// Cues for the (external) audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioCue {
    Eat,
    Die,
    Buy,
    Reward,
    MusicStart,
    MusicStop,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    StateChanged { from: GameState, to: GameState },
    ScoreChanged { score: u32, combo: u32 },
    Collision(CollisionKind),
    FoodEaten { at: Vector2, points: u32 },
    CurrencyChanged(u32),
    SkinPurchased(Skin),
    SkinSelected(Skin),
    AchievementUnlocked(Achievement),
    /// A finished round made the leaderboard at zero-based `rank`
    LeaderboardUpdated { rank: usize, score: u32 },
    Audio(AudioCue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StateChanged,
    ScoreChanged,
    Collision,
    FoodEaten,
    CurrencyChanged,
    SkinPurchased,
    SkinSelected,
    AchievementUnlocked,
    LeaderboardUpdated,
    Audio,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::StateChanged { .. } => EventKind::StateChanged,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::Collision(_) => EventKind::Collision,
            GameEvent::FoodEaten { .. } => EventKind::FoodEaten,
            GameEvent::CurrencyChanged(_) => EventKind::CurrencyChanged,
            GameEvent::SkinPurchased(_) => EventKind::SkinPurchased,
            GameEvent::SkinSelected(_) => EventKind::SkinSelected,
            GameEvent::AchievementUnlocked(_) => EventKind::AchievementUnlocked,
            GameEvent::LeaderboardUpdated { .. } => EventKind::LeaderboardUpdated,
            GameEvent::Audio(_) => EventKind::Audio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, EventKind, Listener)>,
    next_id: u32,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind, Box::new(listener)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        let kind = event.kind();
        for (_, wanted, listener) in self.listeners.iter_mut() {
            if *wanted == kind {
                listener(&event);
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    pub fn on_state_change(
        &mut self,
        mut listener: impl FnMut(GameState, GameState) + 'static,
    ) -> SubscriptionId {
        self.subscribe(EventKind::StateChanged, move |event| {
            if let GameEvent::StateChanged { from, to } = event {
                listener(*from, *to);
            }
        })
    }

    /// Listener receives `(score, combo)`
    pub fn on_score_change(&mut self, mut listener: impl FnMut(u32, u32) + 'static) -> SubscriptionId {
        self.subscribe(EventKind::ScoreChanged, move |event| {
            if let GameEvent::ScoreChanged { score, combo } = event {
                listener(*score, *combo);
            }
        })
    }

    pub fn on_collision(
        &mut self,
        mut listener: impl FnMut(CollisionKind) + 'static,
    ) -> SubscriptionId {
        self.subscribe(EventKind::Collision, move |event| {
            if let GameEvent::Collision(kind) = event {
                listener(*kind);
            }
        })
    }

    pub fn on_achievement(
        &mut self,
        mut listener: impl FnMut(Achievement) + 'static,
    ) -> SubscriptionId {
        self.subscribe(EventKind::AchievementUnlocked, move |event| {
            if let GameEvent::AchievementUnlocked(achievement) = event {
                listener(*achievement);
            }
        })
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_multiple_subscribers_receive_event() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = seen.clone();
            bus.subscribe(EventKind::ScoreChanged, move |event| {
                seen.borrow_mut().push((tag, event.clone()));
            });
        }

        bus.emit(GameEvent::ScoreChanged { score: 10, combo: 1 });

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "a");
        assert_eq!(seen[1].0, "b");
    }

    #[test]
    fn test_listeners_filter_by_kind() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        bus.subscribe(EventKind::Collision, move |_| *c.borrow_mut() += 1);

        bus.emit(GameEvent::Audio(AudioCue::Eat));
        bus.emit(GameEvent::Collision(CollisionKind::Wall));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(EventKind::Audio, |_| {});
        assert_eq!(bus.listener_count(EventKind::Audio), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.listener_count(EventKind::Audio), 0);
    }

    #[test]
    fn test_typed_helpers() {
        let mut bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        bus.on_state_change(move |from, to| l.borrow_mut().push(format!("{from:?}->{to:?}")));
        let l = log.clone();
        bus.on_score_change(move |score, combo| l.borrow_mut().push(format!("{score}x{combo}")));
        let l = log.clone();
        bus.on_collision(move |kind| l.borrow_mut().push(format!("{kind:?}")));
        let l = log.clone();
        bus.on_achievement(move |achievement| l.borrow_mut().push(achievement.id().to_string()));

        bus.emit(GameEvent::StateChanged {
            from: GameState::Menu,
            to: GameState::Playing,
        });
        bus.emit(GameEvent::ScoreChanged { score: 21, combo: 2 });
        bus.emit(GameEvent::Collision(CollisionKind::Wall));
        bus.emit(GameEvent::AchievementUnlocked(Achievement::Combo5));
        bus.emit(GameEvent::LeaderboardUpdated { rank: 0, score: 21 });

        assert_eq!(
            *log.borrow(),
            vec!["Menu->Playing", "21x2", "Wall", "combo_5"]
        );
    }
}
