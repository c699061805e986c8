use time::OffsetDateTime;

use crate::error::ApiError;
use crate::validate;

use super::dto::CreateEventRequest;
use super::repo_types::Guest;

/// System-wide cap on concurrently existing events.
pub const MAX_EVENTS: i64 = 3;

/// Precondition check run before an event insert. This is a plain count
/// comparison, not a reservation: two creates racing at the boundary can
/// transiently overshoot the cap, which is tolerated at this scale.
pub fn ensure_quota(existing: i64) -> Result<(), ApiError> {
    if existing >= MAX_EVENTS {
        return Err(ApiError::QuotaExceeded(MAX_EVENTS));
    }
    Ok(())
}

/// Field and cross-field checks for a new event. `now` is the single
/// write-time instant the date is compared against; a date equal to `now`
/// passes, only a strictly earlier one is rejected.
pub fn validate_new_event(req: &CreateEventRequest, now: OffsetDateTime) -> Result<(), ApiError> {
    validate::required("name", &req.name)?;
    validate::required("time", &req.time)?;
    validate::required("location", &req.location)?;
    if req.date < now {
        return Err(ApiError::validation(
            "date",
            "event date cannot be in the past",
        ));
    }
    validate_guests(&req.guests)
}

/// Checks applied wherever a full guest collection is written.
pub fn validate_guests(guests: &[Guest]) -> Result<(), ApiError> {
    for (i, guest) in guests.iter().enumerate() {
        if guest.name.trim().is_empty() {
            return Err(ApiError::validation(
                "guests",
                format!("guest #{} is missing a name", i + 1),
            ));
        }
        if guest.surname.trim().is_empty() {
            return Err(ApiError::validation(
                "guests",
                format!("guest #{} is missing a surname", i + 1),
            ));
        }
        if let Some(email) = guest.email.as_deref() {
            if !email.is_empty() && !validate::is_valid_email(email) {
                return Err(ApiError::validation(
                    "guests",
                    format!("guest #{} has an invalid email", i + 1),
                ));
            }
        }
    }
    Ok(())
}
