//! Directory listing with the search-word heuristic used by folder tagging

use log::{debug, warn};
use std::fs;
use std::path::Path;

use super::error::ScanError;
use super::traits::{EntryScanner, ScanEntry};

/// Prefix that marks hidden entries
const HIDDEN_PREFIX: char = '.';

/// Scanner over the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DirScanner;

impl EntryScanner for DirScanner {
    fn list_entries(&self, dir: &Path, search_word: Option<&str>) -> Result<Vec<ScanEntry>, ScanError> {
        let dir = std::path::absolute(dir).map_err(|e| ScanError::io(dir, e))?;
        let variants = search_word.map(case_variants).unwrap_or_default();

        let mut entries = Vec::new();
        for item in fs::read_dir(&dir).map_err(|e| ScanError::io(&dir, e))? {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    warn!("Failed to read entry in {}: {e}", dir.display());
                    continue;
                }
            };
            let name = match item.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("Skipping non-UTF-8 entry {}", item.path().display());
                    continue;
                }
            };
            if name.starts_with(HIDDEN_PREFIX) {
                continue;
            }
            if !variants.is_empty() && !variants.iter().any(|v| name.contains(v.as_str())) {
                continue;
            }
            let path = item.path();
            // Follows symlinks: a link to a regular file counts as a file
            let is_dir = !path.is_file();
            entries.push(ScanEntry { path, name, is_dir });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("scanned {}: {} entries (word={search_word:?})", dir.display(), entries.len());
        Ok(entries)
    }
}

/// The spellings of `word` that a name may contain: as given, upper, lower
/// and title case, without repeats.
#[must_use]
pub fn case_variants(word: &str) -> Vec<String> {
    let mut variants = Vec::with_capacity(4);
    for variant in [word.to_string(), word.to_uppercase(), word.to_lowercase(), title_case(word)] {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut in_word = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
