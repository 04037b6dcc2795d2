//! Render plan handed to the template engine

use super::mapping::{self, PathMapping};
use super::Resolver;
use crate::answers::AnswerSet;
use crate::config::TemplateData;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;

/// One file of the template tree and what happens to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub source: String,
    /// Where the file lands: its exact mapping, else the last matching
    /// pattern move, else its own path
    pub destination: String,
    pub included: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub answers: AnswerSet,
    pub data: TemplateData,
    pub files: Vec<PlannedFile>,
    /// Glob-keyed moves, already applied to `files`
    pub patterns: PathMapping,
}

impl Plan {
    pub fn build(resolver: &Resolver, answers: &AnswerSet) -> Result<Self> {
        let root = &resolver.config().template_root;
        let mapping = resolver.resolve(answers)?;

        let mut patterns = PathMapping::new();
        let mut exact = PathMapping::new();
        for (source, destination) in mapping {
            if is_pattern(&source) {
                patterns.insert(source, destination);
            } else {
                exact.insert(source, destination);
            }
        }
        let moves = compile_patterns(&patterns)?;

        let files = mapping::list_files(root, "")
            .with_context(|| format!("Failed to list templates in {}", root.display()))?
            .into_iter()
            .map(|source| {
                let included = match resolver.filters().excluded_by(&source, answers) {
                    Some(rule) => {
                        tracing::debug!(source = %source, rule = rule.pattern(), "excluded");
                        false
                    }
                    None => true,
                };
                let destination = if exact.contains_source(&source) {
                    exact.get(&source)
                } else {
                    moves
                        .iter()
                        .rev()
                        .find(|(matcher, _)| matcher.is_match(&source))
                        .map(|(_, destination)| *destination)
                }
                .unwrap_or(source.as_str())
                .to_string();
                PlannedFile {
                    source,
                    destination,
                    included,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            files = files.len(),
            included = files.iter().filter(|f| f.included).count(),
            "resolved render plan"
        );

        Ok(Self {
            answers: answers.clone(),
            data: resolver.config().template_data(),
            files,
            patterns,
        })
    }

    /// Files the engine should render, as `(source, destination)` pairs
    pub fn included(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .filter(|f| f.included)
            .map(|f| (f.source.as_str(), f.destination.as_str()))
    }
}

fn is_pattern(path: &str) -> bool {
    path.contains(['*', '?', '[', '{'])
}

/// Compile glob-keyed moves in mapping order
fn compile_patterns(patterns: &PathMapping) -> Result<Vec<(GlobMatcher, &str)>, ConfigError> {
    patterns
        .iter()
        .map(|(pattern, destination)| {
            let matcher = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?
                .compile_matcher();
            Ok((matcher, destination))
        })
        .collect()
}
