use sqlx::types::Json;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Event, Expense, Guest};

/// Insert payload for a new event; budget starts at its column default.
pub struct NewEvent<'a> {
    pub name: &'a str,
    pub date: OffsetDateTime,
    pub time: &'a str,
    pub location: &'a str,
    pub description: Option<&'a str>,
    pub guests: &'a [Guest],
}

impl Event {
    /// Number of events currently stored, for the quota precondition.
    pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(db)
            .await?;
        Ok(row.0)
    }

    pub async fn create(db: &PgPool, new: NewEvent<'_>) -> sqlx::Result<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, date, time, location, description, guests)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, date, time, location, description, budget,
                      guests, expenses, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.date)
        .bind(new.time)
        .bind(new.location)
        .bind(new.description)
        .bind(Json(new.guests))
        .fetch_one(db)
        .await
    }

    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, time, location, description, budget,
                   guests, expenses, created_at
            FROM events
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, time, location, description, budget,
                   guests, expenses, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Replace the whole guest collection in one row write; no diffing
    /// against the stored list. Returns `None` when the event is missing.
    pub async fn replace_guests(
        db: &PgPool,
        id: Uuid,
        guests: &[Guest],
    ) -> sqlx::Result<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET guests = $2
            WHERE id = $1
            RETURNING id, name, date, time, location, description, budget,
                      guests, expenses, created_at
            "#,
        )
        .bind(id)
        .bind(Json(guests))
        .fetch_optional(db)
        .await
    }

    /// Replace the budget total and the whole expense collection together,
    /// as one row write.
    pub async fn replace_budget(
        db: &PgPool,
        id: Uuid,
        budget: f64,
        expenses: &[Expense],
    ) -> sqlx::Result<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET budget = $2, expenses = $3
            WHERE id = $1
            RETURNING id, name, date, time, location, description, budget,
                      guests, expenses, created_at
            "#,
        )
        .bind(id)
        .bind(budget)
        .bind(Json(expenses))
        .fetch_optional(db)
        .await
    }

    /// Delete the event; embedded guests and expenses go with the row.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
