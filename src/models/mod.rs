pub mod bookmark;
pub mod note;
pub mod tag;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

use crate::{error::Error, result::Result};

/// Pinboard's wire format for timestamps, e.g. `2024-01-02T03:04:05Z`.
pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn yes_no<S>(value: &bool, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(if *value { "yes" } else { "no" })
}

// Only called for `Some`; callers pair it with `skip_serializing_if`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn maybe_yes_no<S>(value: &Option<bool>, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    yes_no(&value.unwrap_or_default(), s)
}

pub(crate) fn comma_list<S>(values: &[String], s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&values.join(","))
}

pub(crate) fn maybe_comma_list<S>(
    values: &Option<Vec<String>>,
    s: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    comma_list(values.as_deref().unwrap_or_default(), s)
}

pub(crate) fn maybe_timestamp<S>(
    at: &Option<DateTime<Utc>>,
    s: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match at {
        Some(at) => s.serialize_str(&timestamp(at)),
        None => s.serialize_none(),
    }
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Rejects empty or whitespace-only values.
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Rejects ids that are blank or would collapse into a parent path (`.`, `..`).
pub(crate) fn require_id(id: &str, what: &str) -> Result<()> {
    require(id, what)?;
    if matches!(id, "." | "..") {
        return Err(Error::invalid(format!("{what} `{id}` is not a valid id")));
    }
    Ok(())
}

/// Rejects lists that are empty, longer than `max`, or contain blank entries.
pub(crate) fn require_list<S: AsRef<str>>(items: &[S], what: &str, max: usize) -> Result<()> {
    if items.is_empty() || items.len() > max {
        return Err(Error::invalid(format!("must provide 1 to {max} {what}")));
    }
    if items.iter().any(|item| item.as_ref().trim().is_empty()) {
        return Err(Error::invalid(format!("{what} must not contain empty entries")));
    }
    Ok(())
}

pub(crate) fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Caps a page size, noting when the caller asked for more than the endpoint allows.
pub(crate) fn clamp_count(count: u32, max: u32, endpoint: &str) -> u32 {
    if count > max {
        log::warn!("{endpoint}: count {count} exceeds the maximum of {max}, clamping");
        return max;
    }
    count
}
