use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::{Expense, Guest};

/// Body for event creation. Guests may be supplied up front.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub guests: Vec<Guest>,
}

/// Body for the guest-list replace. A missing `guests` field is a caller
/// error; an explicit empty list clears the collection.
#[derive(Debug, Deserialize)]
pub struct ReplaceGuestsRequest {
    #[serde(default)]
    pub guests: Option<Vec<Guest>>,
}

/// Body for the budget replace. Budget total and expense collection are
/// written together in full; the two are independent inputs and their sum
/// is deliberately not cross-checked.
#[derive(Debug, Deserialize)]
pub struct ReplaceBudgetRequest {
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Confirmation returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_guests_field_is_distinct_from_an_empty_list() {
        let absent: ReplaceGuestsRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(absent.guests.is_none());

        let empty: ReplaceGuestsRequest =
            serde_json::from_str(r#"{"guests":[]}"#).expect("deserialize");
        assert!(empty.guests.expect("present").is_empty());
    }

    #[test]
    fn budget_request_defaults_both_halves() {
        let req: ReplaceBudgetRequest = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(req.budget, 0.0);
        assert!(req.expenses.is_empty());
    }

    #[test]
    fn create_request_parses_an_rfc3339_date() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"name":"Boda","date":"2030-06-15T17:00:00Z","time":"17:00","location":"Sevilla"}"#,
        )
        .expect("deserialize");
        assert_eq!(req.date.year(), 2030);
        assert!(req.guests.is_empty());
        assert!(req.description.is_none());
    }

    #[test]
    fn create_request_requires_the_core_fields() {
        assert!(serde_json::from_str::<CreateEventRequest>(
            r#"{"name":"Boda","time":"17:00","location":"Sevilla"}"#
        )
        .is_err());
    }
}
