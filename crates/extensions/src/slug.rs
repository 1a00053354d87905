//! URL/file-safe identifiers from display names.

/// Turns free text into a slug.
pub trait Slugifier: Send + Sync {
    fn slugify(&self, text: &str) -> String;
}

/// Lowercase alphanumerics separated by single dashes.
///
/// Any run of characters that are not alphanumeric becomes one `-`; leading
/// and trailing dashes are dropped. Non-ASCII letters are kept (lowercased),
/// so `"Café Menu"` becomes `"café-menu"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSlugifier;

impl Slugifier for DefaultSlugifier {
    fn slugify(&self, text: &str) -> String {
        let mut slug = String::with_capacity(text.len());
        let mut pending_dash = false;
        for c in text.chars() {
            if c.is_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        slug
    }
}
