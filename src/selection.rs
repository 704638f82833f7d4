//! Selection attributes and candidate source paths
//!
//! A [`Selection`] is an ordered list of named dimensions (for example
//! `country` and `gender`). Each dimension holds either a concrete value or
//! the common wildcard. The selection expands into candidate directories,
//! most specific first:
//!
//! ```text
//! cn/male  ->  cn/common  ->  common/male  ->  common/common
//! ```

use std::fmt;

use thiserror::Error;

use crate::source::SourcePath;

/// Default name of the directory standing in for any omitted dimension
pub const COMMON: &str = "common";

/// Errors raised while building a selection from user input
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A value that cannot be used as a directory name
    #[error("invalid value '{value}' for '{name}': {reason}")]
    InvalidAttribute {
        name: String,
        value: String,
        reason: String,
    },

    /// A dimension that the asset tree does not use
    #[error("unknown attribute '{name}' (known attributes: {known})")]
    UnknownAttribute { name: String, known: String },
}

impl SelectionError {
    fn invalid(name: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// One named dimension of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Concrete value, or `None` for the common wildcard
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute; an empty value means common
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        let value = value.trim().to_lowercase();
        Self {
            name: name.into(),
            value: (!value.is_empty()).then_some(value),
        }
    }

    pub fn common(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn is_common(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered selection attributes for one generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    attributes: Vec<Attribute>,
}

impl Selection {
    /// Create a selection with no dimensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dimension with a concrete value
    pub fn with(mut self, name: impl Into<String>, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append a dimension set to the common wildcard
    pub fn with_common(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::common(name));
        self
    }

    /// Build a selection for the configured `dimensions` from name/value pairs
    ///
    /// Dimensions without a pair are common. Values are checked so they can
    /// only ever name a single directory below the asset root.
    pub fn validated<'a, I>(dimensions: &[String], pairs: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut attributes: Vec<Attribute> =
            dimensions.iter().map(|d| Attribute::common(d.as_str())).collect();

        for (name, value) in pairs {
            let slot = attributes
                .iter_mut()
                .find(|a| a.name == name)
                .ok_or_else(|| SelectionError::UnknownAttribute {
                    name: name.to_string(),
                    known: dimensions.join(", "),
                })?;
            validate_value(name, value)?;
            *slot = Attribute::new(name, value);
        }

        Ok(Self { attributes })
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up the value of a dimension by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Values in dimension order, with `common` in place of wildcards
    pub fn values<'a>(&'a self, common: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.attributes
            .iter()
            .map(move |a| a.value.as_deref().unwrap_or(common))
    }

    /// Render as `name=value` pairs, naming wildcards after `common`
    pub fn describe(&self, common: &str) -> String {
        if self.attributes.is_empty() {
            return "<no attributes>".to_string();
        }
        self.attributes
            .iter()
            .zip(self.values(common))
            .map(|(a, value)| format!("{}={}", a.name, value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Enumerate candidate directories from most to least specific
    ///
    /// Candidates with more concrete dimensions come first. Among candidates
    /// with the same number of concrete dimensions, a concrete value in an
    /// earlier dimension wins. Wildcard attributes collapse duplicate
    /// candidates, keeping the first occurrence. With no dimensions the only
    /// candidate is the asset root.
    pub fn candidate_paths(&self, common: &str) -> Vec<SourcePath> {
        let n = self.attributes.len();
        let mut masks: Vec<Vec<bool>> = (0..1usize << n)
            .map(|bits| (0..n).map(|i| bits & (1 << (n - 1 - i)) != 0).collect())
            .collect();
        masks.sort_by(|a, b| {
            let concrete = |m: &Vec<bool>| m.iter().filter(|c| **c).count();
            concrete(b).cmp(&concrete(a)).then_with(|| b.cmp(a))
        });

        let mut paths: Vec<SourcePath> = Vec::with_capacity(masks.len());
        for mask in masks {
            let path = SourcePath::from_segments(self.attributes.iter().zip(&mask).map(
                |(attr, concrete)| match (&attr.value, concrete) {
                    (Some(value), true) => value.as_str(),
                    _ => common,
                },
            ));
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(COMMON))
    }
}

fn validate_value(name: &str, value: &str) -> Result<(), SelectionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::invalid(name, value, "value must not be empty"));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(SelectionError::invalid(name, value, "relative path components are not allowed"));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(SelectionError::invalid(name, value, "path separators are not allowed"));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(SelectionError::invalid(name, value, "control characters are not allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(selection: &Selection) -> Vec<String> {
        selection
            .candidate_paths(COMMON)
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_two_dimension_precedence() {
        let selection = Selection::new().with("country", "cn").with("gender", "male");
        assert_eq!(
            paths(&selection),
            vec!["cn/male", "cn/common", "common/male", "common/common"]
        );
    }

    #[test]
    fn test_zero_dimensions_is_root() {
        let candidates = Selection::new().candidate_paths(COMMON);
        assert_eq!(candidates, vec![SourcePath::root()]);
    }

    #[test]
    fn test_single_dimension() {
        let selection = Selection::new().with("country", "cn");
        assert_eq!(paths(&selection), vec!["cn", "common"]);
    }

    #[test]
    fn test_three_dimensions_ordering() {
        let selection = Selection::new()
            .with("a", "x")
            .with("b", "y")
            .with("c", "z");
        assert_eq!(
            paths(&selection),
            vec![
                "x/y/z",
                "x/y/common",
                "x/common/z",
                "common/y/z",
                "x/common/common",
                "common/y/common",
                "common/common/z",
                "common/common/common",
            ]
        );
    }

    #[test]
    fn test_wildcard_collapses_duplicates() {
        let selection = Selection::new().with_common("country").with("gender", "female");
        assert_eq!(paths(&selection), vec!["common/female", "common/common"]);
    }

    #[test]
    fn test_empty_value_is_common() {
        let selection = Selection::new().with("country", "  ").with("gender", "male");
        assert!(selection.attributes()[0].is_common());
        assert_eq!(paths(&selection), vec!["common/male", "common/common"]);
    }

    #[test]
    fn test_values_are_case_normalized() {
        let selection = Selection::new().with("country", "CN");
        assert_eq!(selection.get("country"), Some("cn"));
    }

    #[test]
    fn test_custom_common_name() {
        let selection = Selection::new().with("gender", "male");
        let candidates: Vec<String> = selection
            .candidate_paths("_any")
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(candidates, vec!["male", "_any"]);
    }

    #[test]
    fn test_display() {
        let selection = Selection::new().with("country", "cn").with_common("gender");
        assert_eq!(selection.to_string(), "country=cn, gender=common");
        assert_eq!(Selection::new().to_string(), "<no attributes>");
    }

    #[test]
    fn test_describe_uses_configured_common() {
        let selection = Selection::new().with("country", "cn").with_common("gender");
        assert_eq!(selection.describe("_any"), "country=cn, gender=_any");
        assert_eq!(selection.values("_any").collect::<Vec<_>>(), vec!["cn", "_any"]);
    }

    #[test]
    fn test_validated_fills_missing_dimensions() {
        let dims = vec!["country".to_string(), "gender".to_string()];
        let selection = Selection::validated(&dims, [("gender", "Female")]).unwrap();
        assert_eq!(selection.get("country"), None);
        assert_eq!(selection.get("gender"), Some("female"));
        assert_eq!(selection.attributes()[0].name, "country");
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        let dims = vec!["country".to_string()];
        for bad in ["", "..", "cn/male", "a\\b", "x\ny"] {
            let result = Selection::validated(&dims, [("country", bad)]);
            assert!(
                matches!(result, Err(SelectionError::InvalidAttribute { .. })),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_validated_rejects_unknown_dimension() {
        let dims = vec!["country".to_string()];
        let err = Selection::validated(&dims, [("hat", "red")]).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownAttribute { .. }));
        assert!(err.to_string().contains("country"));
    }
}
