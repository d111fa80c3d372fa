//! Slug derivation for categories, brands and products.

use crate::errors::{Error, Result};
use unicode_normalization::UnicodeNormalization;

/// Turns a display name into a URL-safe slug.
///
/// The name is NFKD-decomposed first so accented letters keep their base letter
/// (`"Café"` becomes `"cafe"`). ASCII letters are then lowercased, digits and `_` are
/// kept, runs of whitespace and hyphens collapse to a single `-`, and everything else is
/// dropped. Leading and trailing `-`/`_` are stripped, so `"  Gaming Laptops & Co. "`
/// becomes `"gaming-laptops-co"`.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;

    for ch in value.nfkd() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch.is_whitespace() {
            pending_hyphen = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// True when `slug` only contains lowercase ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Picks the slug to store: the explicit one when given and non-blank, otherwise one
/// derived from `name`.
///
/// # Errors
/// Returns `Error::Validation` when the explicit slug has invalid characters or when
/// nothing slug-worthy is left of `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) if is_valid_slug(slug) => Ok(slug.to_string()),
        Some(slug) => Err(Error::validation(format!(
            "Slug '{slug}' may only contain lowercase letters, digits, hyphens and underscores"
        ))),
        None => {
            let derived = slugify(name);
            if derived.is_empty() {
                return Err(Error::validation(format!(
                    "Cannot derive a slug from '{name}'"
                )));
            }
            Ok(derived)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Gaming Laptops"), "gaming-laptops");
        assert_eq!(slugify("  Gaming   Laptops & Co. "), "gaming-laptops-co");
        assert_eq!(slugify("Wi-Fi -- Routers"), "wi-fi-routers");
        assert_eq!(slugify("_private_"), "private");
        assert_eq!(slugify("Office 365"), "office-365");
    }

    #[test]
    fn test_slugify_drops_everything_else() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_keeps_base_letters() {
        assert_eq!(slugify("Café"), "cafe");
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("École Laptop"), "ecole-laptop");
        assert_eq!(slugify("ﬁle Ⅳ"), "file-iv");
    }

    #[test]
    fn test_resolve_slug() {
        assert_eq!(resolve_slug(None, "Laptops").ok().as_deref(), Some("laptops"));
        assert_eq!(resolve_slug(Some("  "), "Laptops").ok().as_deref(), Some("laptops"));
        assert_eq!(
            resolve_slug(Some("custom-slug"), "Laptops").ok().as_deref(),
            Some("custom-slug")
        );
        assert!(matches!(
            resolve_slug(Some("Not A Slug"), "Laptops"),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(resolve_slug(None, "???"), Err(Error::Validation { .. })));
    }
}
