use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::slots::{Comparator, SlotConfig};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read slot config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse slot config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsFile {
    pub slots: Vec<SlotConfig>,
}

/// Reads the YAML calibration file when present, otherwise falls back to the
/// compiled-in registry.
pub fn load_slots(config_path: &Path) -> Result<Vec<SlotConfig>, RegistryError> {
    if !config_path.exists() {
        return Ok(builtin_slots());
    }
    let raw = fs::read_to_string(config_path)?;
    let file: SlotsFile = serde_yaml::from_str(&raw)?;
    Ok(file.slots)
}

/// Calibration constants of the shipped artifacts. Threshold direction differs
/// per artifact and must not be unified; label text is part of the calibration
/// (the ResNet disease label carries a trailing period).
pub fn builtin_slots() -> Vec<SlotConfig> {
    vec![
        SlotConfig {
            key: "model1".to_string(),
            display_name: "Selfmodel".to_string(),
            artifact: "Selfmodel.onnx".to_string(),
            threshold: 0.45492,
            comparator: Comparator::Above,
            healthy_label: "Healthy".to_string(),
            disease_label: "Cardiovascular Disease".to_string(),
            // Calibration never re-validated against the shipped artifact;
            // stays off until that happens.
            enabled: false,
        },
        SlotConfig {
            key: "model2".to_string(),
            display_name: "ResNet".to_string(),
            artifact: "ResNetmodel.onnx".to_string(),
            threshold: 0.8473,
            comparator: Comparator::Above,
            healthy_label: "Healthy".to_string(),
            disease_label: "Prone to/Suffering from Cardiovascular Disease.".to_string(),
            enabled: true,
        },
        SlotConfig {
            key: "model3".to_string(),
            display_name: "MobileNet".to_string(),
            artifact: "MobileNetmodel.onnx".to_string(),
            threshold: 0.5886,
            comparator: Comparator::Below,
            healthy_label: "Healthy".to_string(),
            disease_label: "Prone to/Suffering from Cardiovascular Disease".to_string(),
            enabled: true,
        },
        SlotConfig {
            key: "model4".to_string(),
            display_name: "VGG16".to_string(),
            artifact: "VGG16.onnx".to_string(),
            threshold: 0.4498,
            comparator: Comparator::Below,
            healthy_label: "Healthy".to_string(),
            disease_label: "Prone to/Suffering from Cardiovascular Disease".to_string(),
            enabled: true,
        },
    ]
}
