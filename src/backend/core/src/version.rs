//! Version tokens carried in `ETag`, `If-Match` and `If-None-Match` headers.
//!
//! A token is the record version in decimal surrounded by double quotes,
//! e.g. `"3"`.

use crate::error::{JobConnectError, Result};

/// Render a version as a quoted token.
pub fn encode(version: i32) -> String {
    format!("\"{}\"", version)
}

/// Decode the token from an `If-Match` header.
///
/// An absent header is [`ErrorCode::VersionMissing`](crate::error::ErrorCode);
/// anything shorter than three characters, not wrapped in quotes, or not
/// holding an `i32` is [`ErrorCode::VersionMalformed`](crate::error::ErrorCode).
pub fn decode(token: Option<&str>) -> Result<i32> {
    let token = token.ok_or_else(JobConnectError::version_missing)?;

    if token.len() < 3 {
        return Err(JobConnectError::version_malformed(token));
    }
    let inner = token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| JobConnectError::version_malformed(token))?;

    inner
        .parse::<i32>()
        .map_err(|e| JobConnectError::version_malformed(token).with_source(e))
}

/// Whether an `If-None-Match` header already names the current version.
pub fn matches_if_none_match(current: i32, header: Option<&str>) -> bool {
    header.is_some_and(|value| value == encode(current))
}
