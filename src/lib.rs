//! Virtual pet simulation.
//!
//! The core is [`pet::Pet`]: four decaying [`vital::VitalStatistic`]s, a
//! five-way [`state::PetState`] machine and cooldown-gated commands. A
//! [`model::GameState`] wraps the pet with an [`inventory::Inventory`],
//! score and parental playtime limits, and is what gets saved.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`vital`] | Bounded, decaying stats |
//! | [`item`] | Food and gift items |
//! | [`inventory`] | Item multiset |
//! | [`state`] | Behavior states, command legality, transition rules |
//! | [`pet`] | Pet aggregate and command API |
//! | [`clock`] | Injected time source for cooldowns |
//! | [`model`] | Session state and save file layout |
//! | [`sim`] | Command dispatch, scoring, ticking |
//! | [`config`] | Settings file and data paths |
//! | [`storage`] | Save/load |
//! | [`input`], [`render`], [`app`] | Terminal front-end |

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod inventory;
pub mod item;
pub mod model;
pub mod pet;
pub mod render;
pub mod sim;
pub mod state;
pub mod storage;
pub mod vital;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::PetError;
pub use inventory::Inventory;
pub use item::{Item, ItemKind};
pub use model::{GameState, ParentalControls, SaveFile};
pub use pet::{CommandOutcome, Pet, PetType};
pub use sim::Command;
pub use state::{Action, PetState};
pub use vital::VitalStatistic;
