//! Release notes rendering.

use crate::service::Comparison;

/// Render the release body for a comparison between the previously released
/// commit and the newly tagged one.
///
/// Plain text with fixed markers: a `Diff:` line, then one block per changed
/// file in the order the service returned them.
pub fn render_release_notes(comparison: &Comparison) -> String {
    let mut notes = format!("Diff: {}\n", comparison.html_url);

    for file in &comparison.files {
        notes.push('\n');
        notes.push_str(&format!("--- {}\n", file.filename));
        notes.push_str(&format!("Status: {}\n", file.status));
        notes.push_str(&format!("Additions: {}\n", file.additions));
        notes.push_str(&format!("Deletions: {}\n", file.deletions));
        notes.push_str(&format!("Changes: {}\n", file.changes));
        notes.push_str(&format!("Blob: {}\n", file.blob_url));

        if let Some(patch) = &file.patch {
            notes.push_str("Patch:\n");
            notes.push_str(patch);
            if !patch.ends_with('\n') {
                notes.push('\n');
            }
        }
    }

    notes
}
