use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A guest's response state to the invitation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

/// Guest embedded in an event. It has no identity of its own and is only
/// ever written as part of the full guest collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
}

/// Expense line embedded in an event, written together with the budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub is_paid: bool,
}

/// Event aggregate row. Guests and expenses live inside the row as JSONB,
/// so replacing either collection is a single-row write.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub time: String,
    pub location: String,
    pub description: Option<String>,
    pub budget: f64,
    pub guests: Json<Vec<Guest>>,
    pub expenses: Json<Vec<Expense>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
