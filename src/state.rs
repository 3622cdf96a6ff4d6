//! Behavior states and the rules that move a pet between them.
//!
//! Each state decides which commands it accepts, what those commands do to
//! the vitals, and what a tick does. Transition precedence lives in
//! [`PetState::resolve`].

use crate::pet::Vitals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health lost at the moment exhaustion forces the pet to sleep.
pub const FORCED_SLEEP_PENALTY: f32 = 10.0;
/// Sleep regained per tick while asleep.
pub const SLEEP_RECOVERY_PER_TICK: f32 = 5.0;
/// Share of the normal fullness decay applied while asleep.
pub const SLEEPING_FULLNESS_DECAY_FACTOR: f32 = 0.5;
/// Extra health lost per tick while hungry.
pub const HUNGRY_HEALTH_LOSS_PER_TICK: f32 = 2.0;
/// Happiness decay multiplier while hungry.
pub const HUNGRY_HAPPINESS_DECAY_FACTOR: f32 = 2.0;
/// Share of maximum happiness an angry pet needs before it calms down.
pub const ANGRY_EXIT_FRACTION: f32 = 0.5;
/// Share of a gift's happiness a hungry pet actually enjoys.
pub const HUNGRY_GIFT_FACTOR: f32 = 0.5;

pub const VET_HEALTH_BOOST: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PetState {
    #[default]
    Normal,
    Sleeping,
    Hungry,
    Angry,
    Dead,
}

impl PetState {
    pub const ALL: [PetState; 5] = [
        PetState::Normal,
        PetState::Sleeping,
        PetState::Hungry,
        PetState::Angry,
        PetState::Dead,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PetState::Normal => "normal",
            PetState::Sleeping => "sleeping",
            PetState::Hungry => "hungry",
            PetState::Angry => "angry",
            PetState::Dead => "dead",
        }
    }

    pub fn is_dead(self) -> bool {
        self == PetState::Dead
    }

    /// Whether `action` does anything in this state.
    pub fn allows(self, action: Action) -> bool {
        self.effect(action, 0.0).is_some()
    }

    /// What `action` does in this state. `magnitude` is the item value for
    /// feeding and gifts and is ignored otherwise. `None` means refused.
    pub(crate) fn effect(self, action: Action, magnitude: f32) -> Option<Effect> {
        use Action::*;
        use PetState::*;

        let adjust = |d: StatDelta| Some(Effect::Adjust(d));
        match (self, action) {
            (Dead | Sleeping, _) => None,

            (Normal | Hungry, Feed) => adjust(StatDelta {
                fullness: magnitude,
                ..StatDelta::ZERO
            }),
            (Angry, Feed) => None,

            (Normal | Angry, GiveGift) => adjust(StatDelta {
                happiness: magnitude,
                ..StatDelta::ZERO
            }),
            (Hungry, GiveGift) => adjust(StatDelta {
                happiness: magnitude * HUNGRY_GIFT_FACTOR,
                ..StatDelta::ZERO
            }),

            (Normal | Hungry, GoToBed) => Some(Effect::FallAsleep),
            (Angry, GoToBed) => None,

            (Normal | Hungry, TakeToVet) => adjust(StatDelta {
                health: VET_HEALTH_BOOST,
                ..StatDelta::ZERO
            }),
            (Angry, TakeToVet) => None,

            (Normal, Play) => adjust(StatDelta {
                health: 0.0,
                sleep: -5.0,
                fullness: -5.0,
                happiness: 15.0,
            }),
            (Hungry, Play) => adjust(StatDelta {
                health: 0.0,
                sleep: -5.0,
                fullness: -5.0,
                happiness: 8.0,
            }),
            (Angry, Play) => adjust(StatDelta {
                happiness: 10.0,
                ..StatDelta::ZERO
            }),

            (Normal, Exercise) => adjust(StatDelta {
                health: 10.0,
                sleep: -10.0,
                fullness: -10.0,
                happiness: 0.0,
            }),
            (Hungry, Exercise) => adjust(StatDelta {
                health: 5.0,
                sleep: -10.0,
                fullness: -15.0,
                happiness: 0.0,
            }),
            (Angry, Exercise) => None,
        }
    }

    /// Per-tick change for this state, given the pet's base decay rates.
    pub(crate) fn tick_delta(self, v: &Vitals) -> StatDelta {
        let sleep = v.sleep.decay_rate();
        let fullness = v.fullness.decay_rate();
        let happiness = v.happiness.decay_rate();
        match self {
            PetState::Normal | PetState::Angry => StatDelta {
                health: -v.health.decay_rate(),
                sleep: -sleep,
                fullness: -fullness,
                happiness: -happiness,
            },
            PetState::Hungry => StatDelta {
                health: -(v.health.decay_rate() + HUNGRY_HEALTH_LOSS_PER_TICK),
                sleep: -sleep,
                fullness: -fullness,
                happiness: -happiness * HUNGRY_HAPPINESS_DECAY_FACTOR,
            },
            PetState::Sleeping => StatDelta {
                health: 0.0,
                sleep: SLEEP_RECOVERY_PER_TICK,
                fullness: -fullness * SLEEPING_FULLNESS_DECAY_FACTOR,
                happiness: 0.0,
            },
            PetState::Dead => StatDelta::ZERO,
        }
    }

    /// Picks the state the vitals call for, highest priority first:
    /// death, waking up, forced sleep, anger, hunger, then the exit checks.
    /// A pet asleep and not yet rested stays asleep unless it dies.
    pub(crate) fn resolve(self, v: &Vitals) -> Resolution {
        if self.is_dead() || v.health.is_zero() {
            return Resolution::to(PetState::Dead);
        }

        let mut current = self;
        if current == PetState::Sleeping {
            if !v.sleep.is_full() {
                return Resolution::to(PetState::Sleeping);
            }
            current = PetState::Normal;
        }

        if v.sleep.is_zero() {
            return Resolution {
                state: PetState::Sleeping,
                forced_sleep: true,
            };
        }
        if v.happiness.is_zero() {
            return Resolution::to(PetState::Angry);
        }
        if v.fullness.is_zero() {
            return Resolution::to(PetState::Hungry);
        }

        let calmed =
            v.happiness.current() >= v.happiness.max() as f32 * ANGRY_EXIT_FRACTION;
        match current {
            PetState::Angry if !calmed => Resolution::to(PetState::Angry),
            _ => Resolution::to(PetState::Normal),
        }
    }
}

impl fmt::Display for PetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The player command surface every state answers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Feed,
    GiveGift,
    GoToBed,
    TakeToVet,
    Play,
    Exercise,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Feed,
        Action::GiveGift,
        Action::GoToBed,
        Action::TakeToVet,
        Action::Play,
        Action::Exercise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::GiveGift => "gift",
            Action::GoToBed => "bed",
            Action::TakeToVet => "vet",
            Action::Play => "play",
            Action::Exercise => "exercise",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed change to each vital. Positive values raise, negative lower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StatDelta {
    pub(crate) health: f32,
    pub(crate) sleep: f32,
    pub(crate) fullness: f32,
    pub(crate) happiness: f32,
}

impl StatDelta {
    pub(crate) const ZERO: StatDelta = StatDelta {
        health: 0.0,
        sleep: 0.0,
        fullness: 0.0,
        happiness: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Effect {
    Adjust(StatDelta),
    FallAsleep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) state: PetState,
    /// Exhaustion put the pet to sleep; the caller owes the health penalty.
    pub(crate) forced_sleep: bool,
}

impl Resolution {
    fn to(state: PetState) -> Self {
        Self {
            state,
            forced_sleep: false,
        }
    }
}
