use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw field values exactly as the search form submits them.
/// The coordinator owns validation; the form owns rendering only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchInput {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub passengers: String,
}

/// Validated trip parameters ready for the booking widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub passenger_count: u32,
}

/// Observable UI state the form collaborator reacts to: `loading` disables
/// the submit control, `dialog_open` triggers the dimming overlay,
/// `error_message` is empty when there is nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiSnapshot {
    pub loading: bool,
    pub dialog_open: bool,
    pub error_message: String,
}
