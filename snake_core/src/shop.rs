//! Currency, skins and the daily reward.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::store::{self, keys, PersistenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Default,
    Blue,
    Gold,
    Rainbow,
}

impl Skin {
    /// Shop order
    pub const ALL: [Skin; 4] = [Skin::Default, Skin::Blue, Skin::Gold, Skin::Rainbow];

    pub fn price(self) -> u32 {
        match self {
            Skin::Default => 0,
            Skin::Blue => 100,
            Skin::Gold => 300,
            Skin::Rainbow => 500,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Skin::Default => "default",
            Skin::Blue => "blue",
            Skin::Gold => "gold",
            Skin::Rainbow => "rainbow",
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Skin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skin::ALL
            .into_iter()
            .find(|skin| skin.id() == s)
            .ok_or_else(|| format!("unknown skin '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Bought { remaining: u32 },
    AlreadyOwned,
    InsufficientFunds { missing: u32 },
}

/// Persistent progression: coins, owned skins, selected skin
pub struct Wallet {
    currency: u32,
    owned: Vec<Skin>,
    current: Skin,
    last_reward_ms: f64,
    store: Rc<dyn PersistenceStore>,
}

impl Wallet {
    /// Load from the store; anything missing or unreadable starts fresh
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        let currency = store::load_parsed(store.as_ref(), keys::CURRENCY).unwrap_or(0);
        let last_reward_ms =
            store::load_parsed(store.as_ref(), keys::LAST_REWARD_TIME).unwrap_or(0.0);

        let stored: Vec<Skin> =
            store::load_json(store.as_ref(), keys::OWNED_SKINS).unwrap_or_default();
        // The default skin is always owned
        let mut owned = vec![Skin::Default];
        for skin in stored {
            if !owned.contains(&skin) {
                owned.push(skin);
            }
        }

        let current = store::load_parsed::<Skin>(store.as_ref(), keys::CURRENT_SKIN)
            .filter(|skin| owned.contains(skin))
            .unwrap_or_default();

        Self {
            currency,
            owned,
            current,
            last_reward_ms,
            store,
        }
    }

    pub fn currency(&self) -> u32 {
        self.currency
    }

    pub fn owned(&self) -> &[Skin] {
        &self.owned
    }

    pub fn owns(&self, skin: Skin) -> bool {
        self.owned.contains(&skin)
    }

    pub fn current_skin(&self) -> Skin {
        self.current
    }

    pub fn add_currency(&mut self, amount: u32) -> u32 {
        self.currency = self.currency.saturating_add(amount);
        self.save_currency();
        self.currency
    }

    pub fn buy_skin(&mut self, skin: Skin) -> Purchase {
        if self.owns(skin) {
            return Purchase::AlreadyOwned;
        }
        let price = skin.price();
        if self.currency < price {
            return Purchase::InsufficientFunds {
                missing: price - self.currency,
            };
        }

        self.currency -= price;
        self.owned.push(skin);
        self.save_currency();
        store::save_json(self.store.as_ref(), keys::OWNED_SKINS, &self.owned);
        log::info!("bought skin {skin} for {price}, {} left", self.currency);
        Purchase::Bought {
            remaining: self.currency,
        }
    }

    /// Select an owned skin; returns false for skins not owned
    pub fn select_skin(&mut self, skin: Skin) -> bool {
        if !self.owns(skin) {
            return false;
        }
        self.current = skin;
        self.store.set(keys::CURRENT_SKIN, skin.id());
        true
    }

    /// Switch to the next owned skin, wrapping around
    pub fn cycle_skin(&mut self) -> Skin {
        let index = self
            .owned
            .iter()
            .position(|&skin| skin == self.current)
            .unwrap_or(0);
        let next = self.owned[(index + 1) % self.owned.len()];
        self.select_skin(next);
        next
    }

    pub fn can_claim_daily_reward(&self, now_ms: f64) -> bool {
        now_ms - self.last_reward_ms >= Params::REWARD_COOLDOWN_MS
    }

    pub fn time_until_next_reward_ms(&self, now_ms: f64) -> f64 {
        (Params::REWARD_COOLDOWN_MS - (now_ms - self.last_reward_ms)).max(0.0)
    }

    /// Grant the daily coins if the cooldown has passed
    pub fn claim_daily_reward(&mut self, now_ms: f64) -> Option<u32> {
        if !self.can_claim_daily_reward(now_ms) {
            return None;
        }
        self.add_currency(Params::DAILY_REWARD);
        self.last_reward_ms = now_ms;
        self.store
            .set(keys::LAST_REWARD_TIME, &format!("{}", now_ms.floor()));
        Some(Params::DAILY_REWARD)
    }

    fn save_currency(&self) {
        self.store.set(keys::CURRENCY, &self.currency.to_string());
    }
}
