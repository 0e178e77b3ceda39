use axum::{extract::RawQuery, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// One-time consumption of the `from`/`to` query parameters: the values
/// pre-fill the search form and the remaining query is what the page keeps
/// in the visible address.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct PrefillParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Split `from`/`to` out of a raw query string. Unrelated parameters are
/// preserved in order; repeated `from`/`to` keep the first value.
pub fn consume_query(query: &str) -> (PrefillParams, String) {
    let mut prefill = PrefillParams::default();
    let mut remaining = Vec::new();

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "from" if prefill.from.is_none() => prefill.from = Some(value.to_string()),
            "to" if prefill.to.is_none() => prefill.to = Some(value.to_string()),
            "from" | "to" => {}
            _ => remaining.push(pair),
        }
    }

    (prefill, remaining.join("&"))
}

#[derive(Debug, Serialize)]
struct PrefillResponse {
    #[serde(flatten)]
    prefill: PrefillParams,
    remaining_query: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/prefill", get(prefill_handler))
}

async fn prefill_handler(RawQuery(query): RawQuery) -> Json<PrefillResponse> {
    let (prefill, remaining_query) = consume_query(query.as_deref().unwrap_or(""));
    Json(PrefillResponse {
        prefill,
        remaining_query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumes_from_and_to() {
        let (prefill, rest) = consume_query("from=Arusha&to=Mwanza");
        assert_eq!(prefill.from.as_deref(), Some("Arusha"));
        assert_eq!(prefill.to.as_deref(), Some("Mwanza"));
        assert_eq!(rest, "");
    }

    #[test]
    fn test_preserves_unrelated_parameters() {
        let (prefill, rest) = consume_query("utm_source=mail&from=Arusha&lang=sw");
        assert_eq!(prefill.from.as_deref(), Some("Arusha"));
        assert_eq!(prefill.to, None);
        assert_eq!(rest, "utm_source=mail&lang=sw");
    }

    #[test]
    fn test_empty_query() {
        let (prefill, rest) = consume_query("");
        assert_eq!(prefill, PrefillParams::default());
        assert_eq!(rest, "");
    }

    #[test]
    fn test_repeated_parameter_keeps_first() {
        let (prefill, rest) = consume_query("from=Arusha&from=Dodoma");
        assert_eq!(prefill.from.as_deref(), Some("Arusha"));
        assert_eq!(rest, "");
    }
}
