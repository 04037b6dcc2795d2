//! Nuxt Scaffold - Generator configuration for Nuxt.js project skeletons
//!
//! This library decides what a new Nuxt.js project is made of. It does not
//! render or copy templates itself; a template engine consumes what it
//! resolves.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Configuration** - Prompt schema, dynamic defaults, typed answers
//! - **Layer 2: Resolution** - Filter table, path mapping and the render `Plan`
//! - **Layer 3: Hooks** - Post-generation steps (git, install, lint fix, instructions)
//!
//! # Example Usage
//!
//! ```ignore
//! use nuxt_scaffold::{config, PartialAnswers, Resolver, ScaffoldConfig};
//!
//! let ctx = config::DefaultContext::detect(Path::new("my-app"));
//! let answers = PartialAnswers::from_yaml("server: express\nui: vuetify\n")?
//!     .complete(&config::prompts(&ctx), &ctx)?;
//!
//! let resolver = Resolver::new(ScaffoldConfig::new("template", false))?;
//! let mapping = resolver.resolve(&answers)?;
//! let keep = resolver.is_included("frameworks/vuetify/plugins/vuetify.js", &answers);
//! ```

pub mod answers;
pub mod config;
pub mod error;
pub mod hooks;
pub mod templates;

// Re-export main types for convenience
pub use answers::{
    AnswerSet, OptionKey, PackageManager, PartialAnswers, Server, SrcDir, Toggle, Ui,
};
pub use config::ScaffoldConfig;
pub use error::ConfigError;
pub use hooks::{run_post, PostContext, ProjectTools, SystemTools};
pub use templates::{FilterTable, PathMapping, Plan, Resolver};
