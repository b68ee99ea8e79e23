use std::fmt;

/// A type as written in a conversion signature, split into qualifier and bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedTypeRef {
    /// Everything before the last `::`, empty for an unqualified type
    pub alias: String,
    pub name: String,
}

impl QualifiedTypeRef {
    /// Split a type's text on its last `::`. Reference sigils are stripped first.
    pub fn parse(type_text: &str) -> Self {
        let stripped = strip_reference(type_text);
        match stripped.rsplit_once("::") {
            Some((alias, name)) => Self {
                alias: alias.trim().to_string(),
                name: name.trim().to_string(),
            },
            None => Self {
                alias: String::new(),
                name: stripped.to_string(),
            },
        }
    }

    pub fn is_qualified(&self) -> bool {
        !self.alias.is_empty()
    }

    /// Aliases spelled as absolute crate paths resolve to themselves
    pub fn is_crate_path(&self) -> bool {
        self.alias == "crate" || self.alias.starts_with("crate::")
    }
}

impl fmt::Display for QualifiedTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alias.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.alias, self.name)
        }
    }
}

/// Drop a leading `&`, `&mut` or lifetime from a type's text
pub fn strip_reference(type_text: &str) -> &str {
    let mut rest = type_text.trim();
    if let Some(after) = rest.strip_prefix('&') {
        rest = after.trim_start();
        if rest.starts_with('\'') {
            rest = rest
                .split_once(char::is_whitespace)
                .map(|(_, r)| r.trim_start())
                .unwrap_or("");
        }
        if let Some(after) = rest.strip_prefix("mut ") {
            rest = after.trim_start();
        }
    }
    rest
}

/// Whether a parameter type is taken by reference
pub fn is_reference(type_text: &str) -> bool {
    type_text.trim_start().starts_with('&')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qualified() {
        let r = QualifiedTypeRef::parse("domain::User");
        assert_eq!(r.alias, "domain");
        assert_eq!(r.name, "User");
        assert!(r.is_qualified());
        assert!(!r.is_crate_path());
    }

    #[test]
    fn test_parse_nested_path_splits_on_last_separator() {
        let r = QualifiedTypeRef::parse("crate::demo::dto::UserAddDto");
        assert_eq!(r.alias, "crate::demo::dto");
        assert_eq!(r.name, "UserAddDto");
        assert!(r.is_crate_path());
    }

    #[test]
    fn test_parse_unqualified() {
        let r = QualifiedTypeRef::parse("User");
        assert_eq!(r.alias, "");
        assert_eq!(r.name, "User");
        assert!(!r.is_qualified());
        assert_eq!(r.to_string(), "User");
    }

    #[test]
    fn test_parse_strips_references() {
        assert_eq!(QualifiedTypeRef::parse("&domain::User").name, "User");
        assert_eq!(QualifiedTypeRef::parse("&mut domain::User").alias, "domain");
        assert_eq!(QualifiedTypeRef::parse("&'a domain::User").to_string(), "domain::User");
        assert!(is_reference("&domain::User"));
        assert!(!is_reference("domain::User"));
    }
}
