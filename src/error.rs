use thiserror::Error;

/// Construction-time failures. Gameplay itself never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PetError {
    #[error("invalid pet name {0:?}: must be 1-{max} characters", max = crate::pet::NAME_MAX)]
    InvalidName(String),

    #[error("unknown pet type {0:?} (expected puppy, kitten or dragon)")]
    UnknownPetType(String),
}
