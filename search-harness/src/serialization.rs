//! Serialization round-trip assertions.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AssertionError;

/// Serializes `value` to JSON and reads it back, failing unless the result
/// equals the original.
///
/// ## Errors
///
/// Returns [`AssertionError::Serialization`] if either direction fails and
/// [`AssertionError::RoundTrip`] if the values differ.
///
/// ## Examples
///
/// ```rust
/// use search_client::endpoints::validate_query::ValidateQueryBody;
/// use search_harness::assert_round_trips;
///
/// let body = ValidateQueryBody {
///     query: Some(serde_json::json!({"match_all": {}})),
/// };
/// assert!(assert_round_trips("body", &body).is_ok());
/// ```
pub fn assert_round_trips<T>(subject: &str, value: &T) -> Result<(), AssertionError>
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let json = to_json(subject, value)?;
    let back: T = serde_json::from_str(&json).map_err(|e| AssertionError::Serialization {
        subject: subject.to_string(),
        message: format!("cannot read back {json}: {e}"),
    })?;

    if &back != value {
        return Err(AssertionError::RoundTrip {
            subject: subject.to_string(),
            expected: format!("{value:?}"),
            actual: format!("{back:?}"),
        });
    }
    Ok(())
}

/// Serializes `value` to a JSON string, labelling failures with `subject`.
///
/// ## Errors
///
/// Returns [`AssertionError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(subject: &str, value: &T) -> Result<String, AssertionError> {
    serde_json::to_string(value).map_err(|e| AssertionError::Serialization {
        subject: subject.to_string(),
        message: e.to_string(),
    })
}
