//! Slug generation for section and heading identifiers

use std::collections::HashMap;

/// Normalize a title into an id-safe slug
///
/// Lowercases the input, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and drops leading/trailing hyphens.
/// Non-ASCII letters are treated as separators, so titles in non-Latin
/// scripts can produce an empty slug; callers apply their own fallback.
///
/// # Examples
/// * "Getting Started!" -> "getting-started"
/// * "  --C++ & Rust--  " -> "c-rust"
/// * "日本語" -> ""
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Tracks issued ids and appends `-2`, `-3`, ... to repeats
///
/// Only used when the caller opts in to unique ids; by default the
/// parser keeps colliding slugs as they are.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashMap<String, usize>,
}

impl SlugRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `id` if unseen, otherwise the next free suffixed variant
    pub fn claim(&mut self, id: String) -> String {
        let count = self.seen.entry(id.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return id;
        }

        let mut suffix = *count;
        loop {
            let candidate = format!("{}-{}", id, suffix);
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(candidate.clone(), 1);
                return candidate;
            }
            suffix += 1;
        }
    }
}
