use uuid::Uuid;

/// Build a URL slug from free text.
///
/// ASCII letters and digits are kept (lowercased); every other run of characters
/// collapses into a single `-`. Leading and trailing separators are dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Opaque, URL-safe token used for tokenized client forms.
#[inline]
pub fn new_form_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust & Actix -- 2024 "), "rust-actix-2024");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_form_tokens_are_unique_and_url_safe() {
        let a = new_form_token();
        let b = new_form_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
