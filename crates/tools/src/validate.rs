//! Shared validation helpers for tool inputs.

use guildhall_core::error::{CoreError, CoreResult};
use uuid::Uuid;

/// Deserialize a tool's raw arguments into its typed input struct.
///
/// Missing required fields, wrong types, and unknown enum values all fail
/// here; the serde error message is wrapped with the tool name so a turn
/// failure identifies the offending invocation.
pub(crate) fn from_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    args: &serde_json::Value,
) -> CoreResult<T> {
    serde_json::from_value(args.clone())
        .map_err(|e| CoreError::validation(format!("{}: {}", tool, e)))
}

/// Require a non-empty string field.
pub(crate) fn non_empty(tool: &str, field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!(
            "{}: {} is required",
            tool, field
        )));
    }
    Ok(())
}

/// Require a well-formed UUID.
pub(crate) fn valid_uuid(tool: &str, field: &str, value: &str) -> CoreResult<()> {
    Uuid::parse_str(value).map_err(|_| {
        CoreError::validation(format!("{}: {} must be a valid UUID", tool, field))
    })?;
    Ok(())
}

/// Require a strictly positive number.
pub(crate) fn positive(tool: &str, field: &str, value: f64) -> CoreResult<()> {
    if value <= 0.0 {
        return Err(CoreError::validation(format!(
            "{}: {} must be positive",
            tool, field
        )));
    }
    Ok(())
}

/// Require a value within an inclusive range.
pub(crate) fn in_range(tool: &str, field: &str, value: f64, min: f64, max: f64) -> CoreResult<()> {
    if value < min || value > max {
        return Err(CoreError::validation(format!(
            "{}: {} must be between {} and {}",
            tool, field, min, max
        )));
    }
    Ok(())
}

/// Require a non-negative integer.
pub(crate) fn non_negative(tool: &str, field: &str, value: i64) -> CoreResult<()> {
    if value < 0 {
        return Err(CoreError::validation(format!(
            "{}: {} must not be negative",
            tool, field
        )));
    }
    Ok(())
}

/// Require a parseable URL. Empty strings pass, matching the permissive
/// original contract for optional URL fields.
pub(crate) fn valid_url(tool: &str, field: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    url::Url::parse(value)
        .map_err(|_| CoreError::validation(format!("{}: {} must be a valid URL", tool, field)))?;
    Ok(())
}

/// Structural email check: non-empty local and domain parts around one '@'.
pub(crate) fn valid_email(tool: &str, field: &str, value: &str) -> CoreResult<()> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(CoreError::validation(format!(
            "{}: {} must be a valid email address",
            tool, field
        )));
    }
    Ok(())
}
