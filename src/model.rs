use crate::inventory::Inventory;
use crate::item::Item;
use crate::pet::Pet;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const SAVE_VERSION: u32 = 1;
pub const GAME_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentalControls {
    pub enabled: bool,
    pub limit_minutes: u32,
}

impl Default for ParentalControls {
    fn default() -> Self {
        Self {
            enabled: false,
            limit_minutes: 60,
        }
    }
}

/// One player's session: the pet plus everything around it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub version: u32,
    pub pet: Pet,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub parental: ParentalControls,
    #[serde(default)]
    pub playtime_secs: u64,
    #[serde(default)]
    pub sim_ticks: u64,
    #[serde(skip)]
    pub(crate) session_started_at: Option<DateTime<Utc>>,
}

impl GameState {
    pub fn new(pet: Pet) -> Self {
        Self {
            version: GAME_VERSION,
            pet,
            inventory: Inventory::new(),
            score: 0,
            parental: ParentalControls::default(),
            playtime_secs: 0,
            sim_ticks: 0,
            session_started_at: None,
        }
    }

    /// Entry point for whatever hands out items.
    pub fn grant_item(&mut self, item: Item, qty: u32) {
        tracing::debug!(item = %item.name, qty, "item granted");
        self.inventory.add_item(item, qty);
    }

    pub fn set_time_limit(&mut self, enabled: bool, minutes: u32) {
        self.parental = ParentalControls {
            enabled,
            limit_minutes: minutes,
        };
    }

    /// Starts the playtime clock. A session already running is folded in
    /// first so no time is lost.
    pub fn start_session(&mut self, now: DateTime<Utc>) {
        if self.session_started_at.is_some() {
            self.end_session(now);
        }
        self.session_started_at = Some(now);
    }

    /// Adds the running session to the cumulative playtime.
    pub fn end_session(&mut self, now: DateTime<Utc>) {
        if let Some(started) = self.session_started_at.take() {
            let secs = (now - started).num_seconds().max(0) as u64;
            self.playtime_secs = self.playtime_secs.saturating_add(secs);
        }
    }

    pub fn session_active(&self) -> bool {
        self.session_started_at.is_some()
    }

    /// Cumulative playtime including the running session.
    pub fn playtime(&self, now: DateTime<Utc>) -> Duration {
        let running = self
            .session_started_at
            .map(|s| (now - s).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        Duration::seconds(self.playtime_secs as i64) + running
    }

    pub fn time_limit_reached(&self, now: DateTime<Utc>) -> bool {
        self.parental.enabled
            && self.playtime(now) >= Duration::minutes(self.parental.limit_minutes as i64)
    }

    /// Clears cumulative playtime. A running session restarts from `now`.
    pub fn reset_playtime(&mut self, now: DateTime<Utc>) {
        self.playtime_secs = 0;
        if self.session_started_at.is_some() {
            self.session_started_at = Some(now);
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub last_seen_utc: DateTime<Utc>,
    pub state: GameState,
}

impl SaveFile {
    pub fn new(state: GameState, now: DateTime<Utc>) -> Self {
        Self {
            version: SAVE_VERSION,
            last_seen_utc: now,
            state,
        }
    }
}
