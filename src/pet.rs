//! The pet aggregate: vitals, behavior state and cooldowns behind one
//! command API.

use crate::clock::Clock;
use crate::error::PetError;
use crate::item::Item;
use crate::state::{Action, Effect, PetState, StatDelta, FORCED_SLEEP_PENALTY};
use crate::vital::VitalStatistic;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NAME_MAX: usize = 18;

pub const PLAY_COOLDOWN_SECS: i64 = 30;
pub const VET_COOLDOWN_SECS: i64 = 60;

/// Share of each maximum a new pet starts with.
const STARTING_FRACTION: f32 = 0.75;

const BASE_SLEEP_DECAY: f32 = 1.0;
const BASE_FULLNESS_DECAY: f32 = 1.5;
const BASE_HAPPINESS_DECAY: f32 = 1.0;

/// Difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PetType {
    /// Easy: even maxima, slow decay.
    Puppy,
    #[default]
    Kitten,
    /// Hard: tough but needy, and starts out grumpy.
    Dragon,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypeProfile {
    pub max_health: u32,
    pub max_sleep: u32,
    pub max_fullness: u32,
    pub max_happiness: u32,
    pub decay_multiplier: f32,
    pub starting_happiness: f32,
}

impl PetType {
    pub fn profile(self) -> TypeProfile {
        match self {
            PetType::Puppy => TypeProfile {
                max_health: 100,
                max_sleep: 100,
                max_fullness: 100,
                max_happiness: 100,
                decay_multiplier: 0.75,
                starting_happiness: STARTING_FRACTION,
            },
            PetType::Kitten => TypeProfile {
                max_health: 100,
                max_sleep: 100,
                max_fullness: 80,
                max_happiness: 120,
                decay_multiplier: 1.0,
                starting_happiness: STARTING_FRACTION,
            },
            PetType::Dragon => TypeProfile {
                max_health: 150,
                max_sleep: 80,
                max_fullness: 120,
                max_happiness: 100,
                decay_multiplier: 1.5,
                starting_happiness: 0.5,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PetType::Puppy => "puppy",
            PetType::Kitten => "kitten",
            PetType::Dragon => "dragon",
        }
    }
}

impl FromStr for PetType {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "puppy" | "easy" => Ok(PetType::Puppy),
            "kitten" | "normal" => Ok(PetType::Kitten),
            "dragon" | "hard" => Ok(PetType::Dragon),
            _ => Err(PetError::UnknownPetType(s.to_string())),
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four stats every pet carries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: VitalStatistic,
    pub sleep: VitalStatistic,
    pub fullness: VitalStatistic,
    pub happiness: VitalStatistic,
}

impl Vitals {
    fn for_type(pet_type: PetType) -> Self {
        let p = pet_type.profile();
        let m = p.decay_multiplier;
        let start = |max: u32, fraction: f32| max as f32 * fraction;
        Self {
            health: VitalStatistic::new(p.max_health, start(p.max_health, STARTING_FRACTION), 0.0),
            sleep: VitalStatistic::new(
                p.max_sleep,
                start(p.max_sleep, STARTING_FRACTION),
                BASE_SLEEP_DECAY * m,
            ),
            fullness: VitalStatistic::new(
                p.max_fullness,
                start(p.max_fullness, STARTING_FRACTION),
                BASE_FULLNESS_DECAY * m,
            ),
            happiness: VitalStatistic::new(
                p.max_happiness,
                start(p.max_happiness, p.starting_happiness),
                BASE_HAPPINESS_DECAY * m,
            ),
        }
    }

    fn apply(&mut self, d: StatDelta) {
        fn shift(v: &mut VitalStatistic, amount: f32) {
            if amount > 0.0 {
                v.increase(amount);
            } else {
                v.decrease(-amount);
            }
        }
        shift(&mut self.health, d.health);
        shift(&mut self.sleep, d.sleep);
        shift(&mut self.fullness, d.fullness);
        shift(&mut self.happiness, d.happiness);
    }

    fn fill(&mut self) {
        self.health.set_to_max();
        self.sleep.set_to_max();
        self.fullness.set_to_max();
        self.happiness.set_to_max();
    }
}

/// Result of a player command. Nothing here is an error: the command was
/// understood and either took effect or was turned down for a reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The current state does not support this command.
    Refused { state: PetState, action: Action },
    /// Rate-limited; try again after `remaining`.
    OnCooldown { action: Action, remaining: Duration },
    /// Wrong kind of item, e.g. feeding a toy.
    Unsuitable,
    /// The session has none of the requested item.
    NotInInventory,
}

impl CommandOutcome {
    pub fn executed(self) -> bool {
        self == CommandOutcome::Applied
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredPet")]
pub struct Pet {
    name: String,
    pet_type: PetType,
    vitals: Vitals,
    state: PetState,
    last_vet_at: Option<DateTime<Utc>>,
    last_play_at: Option<DateTime<Utc>>,
}

/// On-disk shape of a pet. Loaded data is reconciled before use.
#[derive(Deserialize)]
struct StoredPet {
    name: String,
    pet_type: PetType,
    vitals: Vitals,
    state: PetState,
    last_vet_at: Option<DateTime<Utc>>,
    last_play_at: Option<DateTime<Utc>>,
}

impl From<StoredPet> for Pet {
    fn from(s: StoredPet) -> Self {
        let mut pet = Pet {
            name: s.name,
            pet_type: s.pet_type,
            vitals: s.vitals,
            state: s.state,
            last_vet_at: s.last_vet_at,
            last_play_at: s.last_play_at,
        };
        pet.reconcile();
        pet
    }
}

impl Pet {
    pub fn new(name: &str, pet_type: PetType) -> Result<Self, PetError> {
        let name = validate_name(name)?;
        let mut pet = Self {
            name,
            pet_type,
            vitals: Vitals::for_type(pet_type),
            state: PetState::Normal,
            last_vet_at: None,
            last_play_at: None,
        };
        pet.reevaluate();
        Ok(pet)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pet_type(&self) -> PetType {
        self.pet_type
    }

    pub fn state(&self) -> PetState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn health(&self) -> &VitalStatistic {
        &self.vitals.health
    }

    pub fn sleep(&self) -> &VitalStatistic {
        &self.vitals.sleep
    }

    pub fn fullness(&self) -> &VitalStatistic {
        &self.vitals.fullness
    }

    pub fn happiness(&self) -> &VitalStatistic {
        &self.vitals.happiness
    }

    pub fn last_play_at(&self) -> Option<DateTime<Utc>> {
        self.last_play_at
    }

    /// Advances one tick: state-specific decay, then re-evaluation.
    pub fn tick(&mut self) {
        if self.is_dead() {
            return;
        }
        let delta = self.state.tick_delta(&self.vitals);
        self.vitals.apply(delta);
        self.reevaluate();
    }

    /// Feeds a food item. Items that would take fullness away are refused
    /// as unsuitable.
    pub fn feed(&mut self, item: &Item) -> CommandOutcome {
        match item.fullness_value().filter(|a| usable_magnitude(*a)) {
            Some(amount) => self.perform(Action::Feed, amount),
            None => CommandOutcome::Unsuitable,
        }
    }

    pub fn receive_gift(&mut self, item: &Item) -> CommandOutcome {
        match item.happiness_value().filter(|a| usable_magnitude(*a)) {
            Some(amount) => self.perform(Action::GiveGift, amount),
            None => CommandOutcome::Unsuitable,
        }
    }

    pub fn go_to_bed(&mut self) -> CommandOutcome {
        self.perform(Action::GoToBed, 0.0)
    }

    pub fn exercise(&mut self) -> CommandOutcome {
        self.perform(Action::Exercise, 0.0)
    }

    pub fn play(&mut self, clock: &dyn Clock) -> CommandOutcome {
        let now = clock.now();
        let outcome = self.perform_gated(Action::Play, self.last_play_at, play_cooldown(), now);
        if outcome.executed() {
            self.last_play_at = Some(now);
        }
        outcome
    }

    pub fn take_to_vet(&mut self, clock: &dyn Clock) -> CommandOutcome {
        let now = clock.now();
        let outcome = self.perform_gated(Action::TakeToVet, self.last_vet_at, vet_cooldown(), now);
        if outcome.executed() {
            self.last_vet_at = Some(now);
        }
        outcome
    }

    pub fn play_cooldown_remaining(&self, clock: &dyn Clock) -> Option<Duration> {
        cooldown_remaining(self.last_play_at, play_cooldown(), clock.now())
    }

    pub fn vet_cooldown_remaining(&self, clock: &dyn Clock) -> Option<Duration> {
        cooldown_remaining(self.last_vet_at, vet_cooldown(), clock.now())
    }

    /// True when `play` would run right now.
    pub fn can_play(&self, clock: &dyn Clock) -> bool {
        self.state.allows(Action::Play) && self.play_cooldown_remaining(clock).is_none()
    }

    /// True when `take_to_vet` would run right now.
    pub fn can_visit_vet(&self, clock: &dyn Clock) -> bool {
        self.state.allows(Action::TakeToVet) && self.vet_cooldown_remaining(clock).is_none()
    }

    /// Restores every stat to its maximum and forces the normal state.
    /// Cooldowns are left running.
    pub fn revive(&mut self) {
        let was = self.state;
        self.vitals.fill();
        self.state = PetState::Normal;
        tracing::info!(pet = %self.name, from = %was, "pet revived");
    }

    fn perform_gated(
        &mut self,
        action: Action,
        last: Option<DateTime<Utc>>,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> CommandOutcome {
        if !self.state.allows(action) {
            return self.refuse(action);
        }
        if let Some(remaining) = cooldown_remaining(last, cooldown, now) {
            tracing::debug!(
                pet = %self.name,
                %action,
                secs = remaining.num_seconds(),
                "on cooldown"
            );
            return CommandOutcome::OnCooldown { action, remaining };
        }
        self.perform(action, 0.0)
    }

    fn perform(&mut self, action: Action, magnitude: f32) -> CommandOutcome {
        match self.state.effect(action, magnitude) {
            None => self.refuse(action),
            Some(Effect::Adjust(delta)) => {
                self.vitals.apply(delta);
                self.reevaluate();
                CommandOutcome::Applied
            }
            Some(Effect::FallAsleep) => {
                self.set_state(PetState::Sleeping);
                CommandOutcome::Applied
            }
        }
    }

    fn refuse(&self, action: Action) -> CommandOutcome {
        tracing::debug!(pet = %self.name, state = %self.state, %action, "command refused");
        CommandOutcome::Refused {
            state: self.state,
            action,
        }
    }

    /// Brings a loaded state back in line with its vitals. Health decides
    /// life and death, so a dead pet with health left is treated as alive.
    fn reconcile(&mut self) {
        if self.state.is_dead() && !self.vitals.health.is_zero() {
            tracing::warn!(pet = %self.name, "saved as dead with health left, reviving state");
            self.state = PetState::Normal;
        }
        self.reevaluate();
    }

    /// Moves to whatever state the vitals call for. Forced sleep costs
    /// health, and that cost alone can kill.
    fn reevaluate(&mut self) {
        let resolution = self.state.resolve(&self.vitals);
        let mut next = resolution.state;
        if resolution.forced_sleep {
            self.vitals.health.decrease(FORCED_SLEEP_PENALTY);
            tracing::debug!(
                pet = %self.name,
                health = self.vitals.health.current(),
                "exhausted, forced to sleep"
            );
            if self.vitals.health.is_zero() {
                next = PetState::Dead;
            }
        }
        self.set_state(next);
    }

    fn set_state(&mut self, next: PetState) {
        if next == self.state {
            return;
        }
        if next.is_dead() {
            tracing::info!(pet = %self.name, from = %self.state, "pet died");
        } else {
            tracing::debug!(pet = %self.name, from = %self.state, to = %next, "state change");
        }
        self.state = next;
    }

    #[cfg(test)]
    pub(crate) fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    #[cfg(test)]
    pub(crate) fn settle(&mut self) {
        self.reevaluate();
    }
}

fn validate_name(name: &str) -> Result<String, PetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > NAME_MAX {
        return Err(PetError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

fn usable_magnitude(amount: f32) -> bool {
    amount.is_finite() && amount >= 0.0
}

fn play_cooldown() -> Duration {
    Duration::seconds(PLAY_COOLDOWN_SECS)
}

fn vet_cooldown() -> Duration {
    Duration::seconds(VET_COOLDOWN_SECS)
}

/// Time left before a command used at `last` may run again, or `None` if
/// it is ready. A timestamp from the future never waits longer than one
/// full cooldown.
fn cooldown_remaining(
    last: Option<DateTime<Utc>>,
    cooldown: Duration,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let last = last?;
    let remaining = (last + cooldown) - now;
    if remaining > Duration::zero() {
        Some(remaining.min(cooldown))
    } else {
        None
    }
}
