//! Generator configuration: template location, prompt schema and defaults

pub mod defaults;
pub mod prompts;

use serde::Serialize;
use std::path::PathBuf;

pub use defaults::DefaultContext;
pub use prompts::{prompts, Prompt, PromptDefault, PromptKind};

/// Environment variable overriding the template directory
pub const TEMPLATE_DIR_ENV: &str = "CREATE_NUXT_TEMPLATE_DIR";

/// Template directory used when nothing else is configured
pub const DEFAULT_TEMPLATE_DIR: &str = "template";

/// Settings fixed once at process entry and handed to the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Root of the template tree; every template path is relative to it
    pub template_root: PathBuf,
    /// Scaffold against the edge release of Nuxt
    pub edge: bool,
}

impl ScaffoldConfig {
    pub fn new(template_root: impl Into<PathBuf>, edge: bool) -> Self {
        Self {
            template_root: template_root.into(),
            edge,
        }
    }

    /// An explicit directory wins over the environment, which wins over the default
    pub fn resolve(template_dir: Option<PathBuf>, edge: bool) -> Self {
        let template_root = template_dir
            .or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        Self::new(template_root, edge)
    }

    /// Data made available to templates alongside the answers
    pub fn template_data(&self) -> TemplateData {
        TemplateData { edge: self.edge }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub edge: bool,
}
