//! Conditional inclusion of template files
//!
//! Each rule pairs a glob over template paths with an equality test on one
//! answer. A path survives when every rule matching it holds; paths no rule
//! matches are always kept.

use crate::answers::{AnswerSet, OptionKey};
use crate::error::ConfigError;
use globset::{GlobBuilder, GlobMatcher};
use std::fmt;

/// Rules applied to the Nuxt template, as `(pattern, expression)` pairs
pub const NUXT_FILTER_RULES: &[(&str, &str)] = &[
    ("server/index-express.js", r#"server == "express""#),
    ("server/index-koa.js", r#"server == "koa""#),
    ("server/index-adonis.js", r#"server == "adonis""#),
    ("server/index-hapi.js", r#"server == "hapi""#),
    ("server/index-feathers.js", r#"server == "feathers""#),
    ("server/index-micro.js", r#"server == "micro""#),
    ("frameworks/adonis/**", r#"server == "adonis""#),
    ("frameworks/feathers/**", r#"server == "feathers""#),
    ("frameworks/vuetify/**", r#"ui == "vuetify""#),
    ("frameworks/element-ui/**", r#"ui == "element-ui""#),
    ("frameworks/ant-design-vue/**", r#"ui == "ant-design-vue""#),
    ("frameworks/tailwind/**", r#"ui == "tailwind""#),
    ("frameworks/buefy/**", r#"ui == "buefy""#),
    ("frameworks/iview/**", r#"ui == "iview""#),
    ("_.eslintrc.js", r#"eslint == "yes""#),
    (".prettierrc", r#"prettier == "yes""#),
];

/// `key == value`, checked against the option's choices when parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub key: OptionKey,
    pub value: String,
}

impl Predicate {
    /// Parse `key == "value"` (`===` and unquoted values are accepted too)
    pub fn parse(expression: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let (key, value) = expression
            .split_once("===")
            .or_else(|| expression.split_once("=="))
            .ok_or_else(|| invalid("expected `key == \"value\"`"))?;

        let key: OptionKey = key.trim().parse()?;
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        if value.contains(['"', '\'', '=']) {
            return Err(invalid("malformed value"));
        }
        key.validate(value)?;

        Ok(Self {
            key,
            value: value.to_string(),
        })
    }

    pub fn evaluate(&self, answers: &AnswerSet) -> bool {
        answers.value(self.key) == self.value
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == \"{}\"", self.key, self.value)
    }
}

#[derive(Debug, Clone)]
pub struct FilterRule {
    pattern: String,
    matcher: GlobMatcher,
    predicate: Predicate,
}

impl FilterRule {
    pub fn new(pattern: &str, expression: &str) -> Result<Self, ConfigError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            predicate: Predicate::parse(expression)?,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered set of filter rules
#[derive(Debug, Clone)]
pub struct FilterTable {
    rules: Vec<FilterRule>,
}

impl FilterTable {
    /// Build a table, rejecting bad patterns and unknown keys up front
    pub fn new(rules: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|(pattern, expression)| FilterRule::new(pattern, expression))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The rules of the Nuxt template
    pub fn nuxt() -> Result<Self, ConfigError> {
        Self::new(NUXT_FILTER_RULES)
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// First rule that matches `path` but fails for `answers`
    pub fn excluded_by(&self, path: &str, answers: &AnswerSet) -> Option<&FilterRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(path) && !rule.predicate.evaluate(answers))
    }

    /// Whether the template file at `path` belongs in the generated project
    pub fn is_included(&self, path: &str, answers: &AnswerSet) -> bool {
        self.excluded_by(path, answers).is_none()
    }
}
