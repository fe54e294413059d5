use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::SlotOutcome;

use super::config::{self, RegistryError};
use super::scorer::{ScoreError, Scorer};

/// Direction of the healthy comparison. Strict in both directions: a score
/// exactly at the threshold never takes the healthy branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    Above,
    Below,
}

impl Comparator {
    pub fn healthy(self, score: f32, threshold: f32) -> bool {
        match self {
            Comparator::Above => score > threshold,
            Comparator::Below => score < threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    pub key: String,
    pub display_name: String,
    pub artifact: String,
    pub threshold: f32,
    pub comparator: Comparator,
    pub healthy_label: String,
    pub disease_label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SlotConfig {
    pub fn verdict(&self, score: f32) -> &str {
        if self.comparator.healthy(score, self.threshold) {
            &self.healthy_label
        } else {
            &self.disease_label
        }
    }
}

/// The set of classifier slots and the directory their artifacts live in.
/// Disabled slots are carried but never dispatched.
#[derive(Clone)]
pub struct SlotRegistry {
    model_dir: PathBuf,
    slots: Vec<SlotConfig>,
}

impl SlotRegistry {
    pub fn new(model_dir: impl Into<PathBuf>, slots: Vec<SlotConfig>) -> Self {
        Self {
            model_dir: model_dir.into(),
            slots,
        }
    }

    pub fn load(model_dir: impl Into<PathBuf>, config_path: &Path) -> Result<Self, RegistryError> {
        Ok(Self::new(model_dir, config::load_slots(config_path)?))
    }

    pub fn enabled(&self) -> impl Iterator<Item = &SlotConfig> {
        self.slots.iter().filter(|slot| slot.enabled)
    }

    pub fn artifact_path(&self, slot: &SlotConfig) -> PathBuf {
        self.model_dir.join(&slot.artifact)
    }

    /// Runs each enabled slot whose key was selected, sequentially. Unselected
    /// slots report `None`; selection of a disabled slot is ignored. One
    /// slot's failure never blocks the others.
    pub fn run_selected(
        &self,
        scorer: &dyn Scorer,
        image_path: &Path,
        selected: &HashSet<String>,
    ) -> Vec<SlotOutcome> {
        self.enabled()
            .map(|slot| SlotOutcome {
                key: slot.key.clone(),
                display_name: slot.display_name.clone(),
                verdict: selected
                    .contains(&slot.key)
                    .then(|| self.run_slot(scorer, slot, image_path)),
            })
            .collect()
    }

    /// Every failure is folded into the returned string so the page always
    /// renders.
    pub fn run_slot(&self, scorer: &dyn Scorer, slot: &SlotConfig, image_path: &Path) -> String {
        match scorer.score(&self.artifact_path(slot), image_path) {
            Ok(score) => {
                log::info!(
                    "{} scored {:.4} for {}",
                    slot.display_name,
                    score,
                    image_path.display()
                );
                slot.verdict(score).to_string()
            }
            Err(ScoreError::Unavailable(_)) => {
                log::warn!("{} artifact missing: {}", slot.display_name, slot.artifact);
                format!(
                    "{} model is not available. Place {} under the model directory.",
                    slot.display_name, slot.artifact
                )
            }
            Err(err) => {
                log::error!("{} prediction failed: {}", slot.display_name, err);
                format!("Error in {} prediction: {}", slot.display_name, err)
            }
        }
    }
}
