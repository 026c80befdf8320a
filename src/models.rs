use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted key/value entries, flushed to the data file as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppData {
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// User-entered amount; forms send text, API clients may send numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Returns the amount when it is a finite number greater than zero.
    pub fn positive(&self) -> Option<f64> {
        let value = match self {
            AmountInput::Number(value) => Some(*value),
            AmountInput::Text(text) => crate::store::parse_decimal(text),
        }?;
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    pub liters: AmountInput,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub goal: AmountInput,
}

#[derive(Debug, Deserialize)]
pub struct IntakeForm {
    pub liters: String,
}

#[derive(Debug, Deserialize)]
pub struct GoalForm {
    pub goal: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub liters: f64,
    pub goal: f64,
    pub percent: f64,
    pub achieved: bool,
    pub intake_message: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPoint {
    pub date: String,
    pub label: String,
    pub liters: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub days: Vec<DailyPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalResponse {
    pub goal: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TipResponse {
    pub tip: String,
}
