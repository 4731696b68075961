//! Shared fixtures for pipeline tests.

use chrono::{TimeZone, Utc};

use crate::core::GenerationRequest;
use crate::utils::{FixedClock, Timestamp};

/// The canonical pet-travel request.
#[must_use]
pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new("Pet-Friendly Beaches")
        .with_keywords("dog beaches, pet travel")
        .with_audience("pet owners")
        .with_call_to_action("Book now")
        .with_word_count(1500)
        .with_requester("editor@example.com")
}

/// 2024-01-01T12:00:00Z.
#[must_use]
pub fn fixed_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A clock frozen at [`fixed_time`].
#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock::new(fixed_time())
}

/// Optimize output in the marker format.
#[must_use]
pub fn optimized_text(title: &str, description: &str, body: &str) -> String {
    format!("META TITLE: {title}\nMETA DESCRIPTION: {description}\n\nOPTIMIZED CONTENT:\n{body}")
}
