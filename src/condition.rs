use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::MirrorResult;

/// Predicate over entity names, used to select rooms and to filter scenes.
///
/// Deserializes from a plain string (exact name), a list of strings (any exact name), an
/// operator object or a `{ pattern }` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum NameCondition {
    Exact(String),
    AnyOf(Vec<String>),
    Operator(NameOperatorCondition),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    pub pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NameOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NameOperatorCondition {
    pub operator: NameOperator,
    pub value: String,
    #[serde(default)]
    pub ignore_case: bool,
}

impl NameOperatorCondition {
    pub fn evaluate(&self, name: &str) -> bool {
        let (name, value) = if self.ignore_case {
            (name.to_lowercase(), self.value.to_lowercase())
        } else {
            (name.to_owned(), self.value.clone())
        };
        match self.operator {
            NameOperator::Equals => name == value,
            NameOperator::Contains => name.contains(&value),
            NameOperator::StartsWith => name.starts_with(&value),
            NameOperator::EndsWith => name.ends_with(&value),
        }
    }
}

impl NameCondition {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(names.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive substring match.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Operator(NameOperatorCondition {
            operator: NameOperator::Contains,
            value: value.into(),
            ignore_case: true,
        })
    }

    /// Case-insensitive whole-name match.
    pub fn equals_ignore_case(value: impl Into<String>) -> Self {
        Self::Operator(NameOperatorCondition {
            operator: NameOperator::Equals,
            value: value.into(),
            ignore_case: true,
        })
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(Pattern {
            pattern: pattern.into(),
        })
    }

    pub fn evaluate(&self, name: &str) -> bool {
        match self {
            NameCondition::Exact(expected) => name == expected,
            NameCondition::AnyOf(names) => names.iter().any(|n| n == name),
            NameCondition::Operator(condition) => condition.evaluate(name),
            NameCondition::Pattern(pattern) => match Regex::new(&pattern.pattern) {
                Ok(re) => re.is_match(name),
                Err(err) => {
                    log::warn!("Ignoring invalid name pattern '{}': {}", pattern.pattern, err);
                    false
                }
            },
        }
    }

    /// Fails on patterns that do not compile, so broken tables are rejected when loaded.
    pub fn validate(&self) -> MirrorResult<()> {
        if let NameCondition::Pattern(pattern) = self {
            Regex::new(&pattern.pattern)?;
        }
        Ok(())
    }
}
