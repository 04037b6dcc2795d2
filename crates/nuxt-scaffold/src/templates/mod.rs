//! Template resolution
//!
//! This module provides:
//! - The filter table deciding which template files are kept
//! - The path mapping relocating kept files into the project
//! - The plan combining both for the rendering engine

pub mod filters;
pub mod mapping;
pub mod plan;

use crate::answers::AnswerSet;
use crate::config::ScaffoldConfig;
use anyhow::Result;

pub use filters::{FilterRule, FilterTable, Predicate, NUXT_FILTER_RULES};
pub use mapping::{expand, list_files, select_framework, PathMapping};
pub use plan::{Plan, PlannedFile};

/// Resolves filters and path mappings against one template tree
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ScaffoldConfig,
    filters: FilterTable,
}

impl Resolver {
    /// Create a resolver using the Nuxt filter rules
    pub fn new(config: ScaffoldConfig) -> Result<Self> {
        Ok(Self::with_filters(config, FilterTable::nuxt()?))
    }

    pub fn with_filters(config: ScaffoldConfig, filters: FilterTable) -> Self {
        Self { config, filters }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterTable {
        &self.filters
    }

    /// Whether the template file at `path` should be generated
    pub fn is_included(&self, path: &str, answers: &AnswerSet) -> bool {
        self.filters.is_included(path, answers)
    }

    /// Source to destination mapping for `answers`
    pub fn resolve(&self, answers: &AnswerSet) -> Result<PathMapping> {
        mapping::resolve(&self.config.template_root, answers)
    }

    /// Everything the engine needs to render the project
    pub fn plan(&self, answers: &AnswerSet) -> Result<Plan> {
        Plan::build(self, answers)
    }
}
