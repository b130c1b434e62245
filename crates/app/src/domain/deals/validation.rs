//! Deal payload validation.
//!
//! Pure checks over raw JSON payloads, run before any storage access. Each check
//! reports the first failing rule only.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::deals::{
    data::{DealUpdate, NewDeal},
    records::DealUuid,
};

/// Wire name of the owner field.
pub const OWNER_ID_FIELD: &str = "dealOwnerId";

/// Wire name of the name field.
pub const NAME_FIELD: &str = "dealName";

/// Wire name of the description field.
pub const DESCRIPTION_FIELD: &str = "dealDescription";

/// Wire name of the value field.
pub const VALUE_FIELD: &str = "dealValueInGWP";

const REQUIRED_ON_CREATE: [&str; 4] = [OWNER_ID_FIELD, NAME_FIELD, DESCRIPTION_FIELD, VALUE_FIELD];

/// Reasons a payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("dealValueInGWP must be a positive number")]
    InvalidValue,

    #[error("dealOwnerId and dealName cannot be updated")]
    ImmutableField,

    #[error("dealId is required in the path parameters")]
    MissingDealId,

    #[error("dealId must be a valid UUID")]
    InvalidDealId,

    #[error("dealOwnerId query parameter is required")]
    MissingOwnerId,
}

impl ValidationError {
    /// Whether the payload tried to change a field that can never change.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::ImmutableField)
    }
}

/// Validate a creation payload.
///
/// Rules, in order: all four fields present, value is a positive number, text
/// fields are strings.
///
/// # Errors
///
/// Returns the first rule the payload breaks.
pub fn validate_new_deal(body: &Value) -> Result<NewDeal, ValidationError> {
    let fields = as_object(body)?;

    if let Some(missing) = REQUIRED_ON_CREATE
        .into_iter()
        .find(|field| !is_present(fields.get(*field)))
    {
        return Err(ValidationError::MissingField(missing));
    }

    let value_in_gwp = positive_number(fields.get(VALUE_FIELD))?;

    Ok(NewDeal {
        owner_id: text(fields, OWNER_ID_FIELD)?,
        name: text(fields, NAME_FIELD)?,
        description: text(fields, DESCRIPTION_FIELD)?,
        value_in_gwp,
    })
}

/// Validate an update payload.
///
/// Rules, in order: owner and name are absent, value (if supplied) is a positive
/// number, description is present and a string. Description must be re-sent on
/// every update even when only the value changes.
///
/// # Errors
///
/// Returns the first rule the payload breaks.
pub fn validate_deal_update(body: &Value) -> Result<DealUpdate, ValidationError> {
    let fields = as_object(body)?;

    if is_present(fields.get(OWNER_ID_FIELD)) || is_present(fields.get(NAME_FIELD)) {
        return Err(ValidationError::ImmutableField);
    }

    let value_in_gwp = if is_supplied(fields.get(VALUE_FIELD)) {
        Some(positive_number(fields.get(VALUE_FIELD))?)
    } else {
        None
    };

    if !is_present(fields.get(DESCRIPTION_FIELD)) {
        return Err(ValidationError::MissingField(DESCRIPTION_FIELD));
    }

    Ok(DealUpdate {
        description: text(fields, DESCRIPTION_FIELD)?,
        value_in_gwp,
    })
}

/// Parse a deal id taken from a request path.
///
/// # Errors
///
/// Returns an error when the id is blank or not a UUID.
pub fn parse_deal_id(raw: &str) -> Result<DealUuid, ValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::MissingDealId);
    }

    raw.parse().map_err(|_parse_error| ValidationError::InvalidDealId)
}

/// Validate the owner id used to list deals.
///
/// # Errors
///
/// Returns an error when the owner id is missing or empty.
pub fn validate_owner_id(raw: Option<String>) -> Result<String, ValidationError> {
    raw.filter(|owner| !owner.is_empty())
        .ok_or(ValidationError::MissingOwnerId)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

/// A field counts as present unless it is missing, `null`, `false`, `""` or `0`.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

/// A field counts as supplied whenever the key carries a non-null value.
fn is_supplied(value: Option<&Value>) -> bool {
    value.is_some_and(|value| !value.is_null())
}

fn positive_number(value: Option<&Value>) -> Result<f64, ValidationError> {
    value
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite() && *number > 0.0)
        .ok_or(ValidationError::InvalidValue)
}

fn text(fields: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(ValidationError::NotAString(field))
}
