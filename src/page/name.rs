//! Validated page names.

use std::fmt;

use super::PageError;

/// Name reserved for the page rendered at the site root.
pub const HOME: &str = "home";

/// Characters a page name may never contain.
///
/// Path separators, whitespace and anything a shell or a file system
/// would treat specially.
const FORBIDDEN: &[char] = &[
    '/', '\\', '-', '.', '<', '>', ':', '"', '|', '?', '*', ';', '&', '$', '`', '\'', '(', ')',
    '{', '}', '[', ']', '!', '#', '~', '%', '^', '=', '+', ',',
];

/// Names that cannot become the page's Go package.
///
/// Go keywords, `main` (not importable) and `layout` (the shared layout
/// package every page imports).
const RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "main", "layout",
];

/// A page name accepted by the registry.
///
/// Non-empty, free of separators and shell meta characters, not ending in
/// `.exe`, and usable both as a Go package name and, title-cased, as an
/// exported Go identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageName(String);

impl PageName {
    /// Validate `raw` as a page name.
    pub fn parse(raw: &str) -> Result<Self, PageError> {
        let invalid = |reason: &str| PageError::Invalid {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("name is empty"));
        }
        if raw.ends_with(".exe") {
            return Err(invalid("name must not end in `.exe`"));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(c))
        {
            return Err(invalid(&format!("character {c:?} is not allowed")));
        }
        if !is_go_identifier(raw) {
            return Err(invalid(
                "name must start with a cased letter and contain only letters, digits and `_`",
            ));
        }
        if RESERVED.contains(&raw) {
            return Err(invalid("name is reserved"));
        }

        Ok(Self(raw.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the page rendered at the site root.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.0 == HOME
    }
}

/// Letters, digits and `_`, starting with a letter that has an upper-case
/// form so the title-cased symbol is exported.
fn is_go_identifier(raw: &str) -> bool {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_lowercase() || first.is_uppercase())
        && chars.all(|c| c == '_' || c.is_alphabetic() || c.is_ascii_digit())
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_names() {
        for name in ["home", "about", "blog2", "Über", "contact_us"] {
            let page = PageName::parse(name).unwrap();
            assert_eq!(page.as_str(), name);
        }
        assert!(PageName::parse("home").unwrap().is_home());
        assert!(!PageName::parse("about").unwrap().is_home());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            PageName::parse(""),
            Err(PageError::Invalid { .. })
        ));
    }

    #[test]
    fn test_rejects_separators_and_meta() {
        for name in [
            "a/b", "a\\b", "my page", "my-page", "a.b", "a;b", "a&b", "$x", "a|b", "a*", "q?",
            "a\tb", "`x`",
        ] {
            assert!(PageName::parse(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_rejects_non_identifiers() {
        for name in ["2024", "1st", "_draft", "日本", "a°b"] {
            let err = PageName::parse(name).unwrap_err();
            assert!(err.to_string().contains("letter"), "{name:?}: {err}");
        }
    }

    #[test]
    fn test_rejects_reserved() {
        for name in ["func", "type", "package", "main", "layout"] {
            let err = PageName::parse(name).unwrap_err();
            assert!(err.to_string().contains("reserved"), "{name:?}: {err}");
        }
        // Only the generated file's own identifiers would clash, and imports are prefixed
        for name in ["page", "log", "render", "templ"] {
            assert!(PageName::parse(name).is_ok(), "{name:?} should be accepted");
        }
    }

    #[test]
    fn test_rejects_exe_suffix() {
        let err = PageName::parse("setup.exe").unwrap_err();
        assert!(err.to_string().contains(".exe"));
    }
}
