mod config;
mod scorer;
mod slots;

pub use config::{builtin_slots, RegistryError};
pub use scorer::{OnnxScorer, ScoreError, Scorer, INPUT_SIZE};
pub use slots::{Comparator, SlotConfig, SlotRegistry};
