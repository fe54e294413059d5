use serde::{Deserialize, Serialize};

/// Verdict of a single classifier slot. `verdict` is `None` when the slot was
/// not selected for the request; a selected slot always carries a string,
/// either a label or an inline diagnostic.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SlotOutcome {
    pub key: String,
    pub display_name: String,
    pub verdict: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScreeningReport {
    pub filename: String,
    pub outcomes: Vec<SlotOutcome>,
}
