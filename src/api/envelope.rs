//! The response envelope used by the finance API.
//!
//! Some endpoints return the payload as the whole response body, e.g.
//! `{"id": 1, "name": "Lazer"}`, while others wrap it in a `data` field, e.g.
//! `{"data": {"id": 1, "name": "Lazer"}}`. Every response is decoded through
//! [Envelope] so callers always receive the bare payload.

use serde::Deserialize;

/// A payload that is either wrapped in `{"data": ...}` or sent as is.
///
/// The wrapped form is tried first. Extra fields next to `data`, such as a
/// status message, are ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(payload) => payload,
        }
    }
}
