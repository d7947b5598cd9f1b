//! Next-tag-name computation.
//!
//! Tag names follow a dotted scheme with a literal `v` component followed by
//! three or four numeric fields: `v.MAJOR.MINOR.PATCH` or
//! `v.MAJOR.MINOR.PATCH.BUILD`. The next name increments the final field.
//! Anything else is rejected as malformed rather than surfacing as an index
//! fault.

use crate::error::ReconcileError;

/// Seed name used when the repository has no tags at all.
pub const INITIAL_TAG_NAME: &str = "v.0.0.1";

/// Compute the name for the next tag, given the newest existing tag name.
///
/// `None` means the repository has no tags yet and yields
/// [`INITIAL_TAG_NAME`].
pub fn next_tag_name(latest: Option<&str>) -> Result<String, ReconcileError> {
    let Some(name) = latest else {
        return Ok(INITIAL_TAG_NAME.to_string());
    };

    let parts: Vec<&str> = name.split('.').collect();

    // "v" plus 3 or 4 numeric fields
    if !(4..=5).contains(&parts.len()) || parts[0] != "v" {
        return Err(ReconcileError::MalformedTagName {
            name: name.to_string(),
        });
    }

    let mut fields = Vec::with_capacity(parts.len() - 1);
    for part in &parts[1..] {
        let field: u64 = part.parse().map_err(|_| ReconcileError::MalformedTagName {
            name: name.to_string(),
        })?;
        fields.push(field);
    }

    let last = fields.len() - 1;
    fields[last] += 1;

    let joined: Vec<String> = fields.iter().map(u64::to_string).collect();
    Ok(format!("v.{}", joined.join(".")))
}
