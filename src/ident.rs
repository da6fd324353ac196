//! Identifier normalization
//!
//! Every collection and tag is stored under an id derived from its display
//! name. Lookups go through the same function so a display name and its key
//! never diverge.

/// Derive the canonical identifier for a display label.
///
/// Lower-cases the label and strips plain spaces (U+0020). Other whitespace
/// is left untouched, so `"My Tag"` and `"my tag"` collapse to `"mytag"`
/// while `"my\ttag"` does not.
///
/// # Examples
/// ```
/// use mtm::ident::normalize;
///
/// assert_eq!(normalize("Urgent Work"), "urgentwork");
/// assert_eq!(normalize("urgent work"), normalize("UrgentWork"));
/// ```
#[must_use]
pub fn normalize(label: &str) -> String {
    label.to_lowercase().replace(' ', "")
}
