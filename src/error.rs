//! Error types for component ingestion and serialization.
//!
//! [`ValidationError`] is what every `to_json` returns on failure: a list of
//! [`Issue`]s, one per violated constraint, each naming the offending field
//! path and the rule it broke. [`BuilderError`] covers everything that can go
//! wrong while turning raw JSON into builders.

use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// A single schema rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present.
    Required,
    /// Either this field or `other` must be present.
    RequiredOneOf {
        /// The alternative field.
        other: &'static str,
    },
    /// The field is not allowed in this shape (e.g. `label` on a premium
    /// button).
    Forbidden {
        /// Name of the shape that forbids the field.
        context: &'static str,
    },
    /// The field cannot coexist with another present field.
    MutuallyExclusive {
        /// The other field that is also present.
        other: &'static str,
    },
    /// String length (in characters) outside `min..=max`.
    Length { min: usize, max: usize },
    /// Number outside `min..=max`.
    Range { min: u64, max: u64 },
    /// List length outside `min..=max`.
    Count { min: usize, max: usize },
    /// The value does not parse as an absolute URL.
    InvalidUrl,
    /// The URL scheme is not one of the allowed schemes.
    UrlScheme { allowed: &'static [&'static str] },
    /// The key is not part of a strict shape.
    UnknownKey,
    /// The discriminant or enum value is not the one this shape accepts.
    UnexpectedType { expected: &'static str },
    /// An action row mixes buttons with other components, or holds more than
    /// one non-button component.
    RowComposition,
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Rule::Required => f.write_str("is required"),
            Rule::RequiredOneOf { other } => write!(f, "or {other} is required"),
            Rule::Forbidden { context } => write!(f, "is not allowed on {context}"),
            Rule::MutuallyExclusive { .. } => f.write_str("is mutually exclusive"),
            Rule::Length { min, max } => {
                write!(f, "must be between {min} and {max} characters long")
            }
            Rule::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Rule::Count { min, max } if min == max => write!(f, "must hold exactly {min} item(s)"),
            Rule::Count { min, max } => write!(f, "must hold between {min} and {max} items"),
            Rule::InvalidUrl => f.write_str("is not a valid URL"),
            Rule::UrlScheme { allowed } => {
                write!(f, "must use one of the schemes: {}", allowed.join(", "))
            }
            Rule::UnknownKey => f.write_str("is not a recognized key"),
            Rule::UnexpectedType { expected } => write!(f, "must be {expected}"),
            Rule::RowComposition => f.write_str(
                "must hold 1 to 5 buttons, or exactly one select menu or text input",
            ),
        }
    }
}

/// One violated constraint.
#[derive(Clone, Debug, PartialEq)]
pub struct Issue {
    /// Dotted path to the field, e.g. `components[1].custom_id`.
    pub path: String,
    /// The rule that failed.
    pub rule: Rule,
    /// The offending value, where there is one.
    pub actual: Option<Value>,
}

impl Issue {
    /// Whether this issue is about `path` (exact match).
    pub fn is_at(&self, path: &str) -> bool {
        self.path == path
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Rule::MutuallyExclusive { other } = &self.rule {
            let field = self.path.rsplit('.').next().unwrap_or(&self.path);
            return write!(
                f,
                "{}: mutually exclusive fields {field} and {other} both present",
                self.path
            );
        }

        write!(f, "{} {}", self.path, self.rule)?;
        if let Some(actual) = &self.actual {
            write!(f, " (got {actual})")?;
        }
        Ok(())
    }
}

/// A payload failed its schema predicate.
///
/// Never empty: a predicate only produces this error when at least one
/// constraint is violated.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("invalid component payload: {}", display_issues(.issues))]
pub struct ValidationError {
    issues: Vec<Issue>,
}

fn display_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// All violated constraints, in the order they were found.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume the error, returning the violated constraints.
    #[must_use = "consuming the error and retrieving the issues has no effect if left unused"]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Whether any issue is about `path`.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.is_at(path))
    }

    /// Re-root every issue path under `prefix`, used when a container
    /// reports a child's failure.
    pub(crate) fn nested(self, prefix: &str) -> Self {
        Self {
            issues: self
                .issues
                .into_iter()
                .map(|mut issue| {
                    issue.path = format!("{prefix}.{}", issue.path);
                    issue
                })
                .collect(),
        }
    }
}

/// Failure while building components from raw data or serializing them.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The `type` discriminant is absent, not an integer, or not a known
    /// component kind. Holds the discriminant as found (`null` if absent).
    #[error("unknown component type: {0}")]
    UnknownComponentType(Value),
    /// The raw data does not have the wire field types (e.g. a numeric
    /// label).
    #[error("malformed component data: {0}")]
    MalformedInput(#[from] serde_json::Error),
    /// The built payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::{BuilderError, Issue, Rule, ValidationError};
    use serde_json::json;

    fn issue(path: &str, rule: Rule) -> Issue {
        Issue {
            path: path.to_owned(),
            rule,
            actual: None,
        }
    }

    #[test]
    fn mutually_exclusive_display_names_both_fields() {
        let issue = issue("url", Rule::MutuallyExclusive { other: "custom_id" });
        assert_eq!(
            issue.to_string(),
            "url: mutually exclusive fields url and custom_id both present"
        );
    }

    #[test]
    fn display_includes_actual_value() {
        let issue = Issue {
            actual: Some(json!("ftp://example.com")),
            ..issue(
                "url",
                Rule::UrlScheme {
                    allowed: &["http", "https"],
                },
            )
        };
        assert_eq!(
            issue.to_string(),
            "url must use one of the schemes: http, https (got \"ftp://example.com\")"
        );
    }

    #[test]
    fn nested_prefixes_every_path() {
        let err = ValidationError::new(vec![
            issue("custom_id", Rule::Required),
            issue("label", Rule::Length { min: 1, max: 80 }),
        ])
        .nested("components[2]");

        assert!(err.has_issue_at("components[2].custom_id"));
        assert!(err.has_issue_at("components[2].label"));
        assert!(!err.has_issue_at("custom_id"));
    }

    #[test]
    fn error_display_joins_issues() {
        let err = ValidationError::new(vec![
            issue("title", Rule::Required),
            issue("components", Rule::Count { min: 1, max: 5 }),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid component payload: title is required; components must hold between 1 and 5 items"
        );
    }

    #[test]
    fn builder_error_wraps_validation_transparently() {
        let err: BuilderError = ValidationError::new(vec![issue("style", Rule::Required)]).into();
        assert!(matches!(err, BuilderError::Validation(_)));
        assert_eq!(err.to_string(), "invalid component payload: style is required");
    }
}
