//! Dynamic prompt defaults

use std::path::Path;
use std::process::Command;

/// Words used for the default project description
const SUPERLATIVES: &[&str] = &[
    "awesome",
    "beautiful",
    "brilliant",
    "excellent",
    "fantastic",
    "first-class",
    "glorious",
    "legendary",
    "magnificent",
    "marvelous",
    "mind-blowing",
    "outstanding",
    "remarkable",
    "splendid",
    "stunning",
    "superb",
    "terrific",
    "wonderful",
];

/// Values the sentinel defaults resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultContext {
    /// Final component of the project folder
    pub folder_name: String,
    /// `git config user.name`, empty when unavailable
    pub git_user: String,
}

impl DefaultContext {
    /// Build the context for a project folder, asking git for the user name
    pub fn detect(folder: &Path) -> Self {
        Self {
            folder_name: folder_name(folder),
            git_user: detect_git_user().unwrap_or_default(),
        }
    }
}

/// Name of the project folder, resolving `.` and relative paths
pub fn folder_name(folder: &Path) -> String {
    let named = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
    };

    named(folder)
        .filter(|n| n != "." && n != "..")
        .or_else(|| folder.canonicalize().ok().as_deref().and_then(named))
        .unwrap_or_else(|| folder.display().to_string())
}

/// Read the git user name from the global git configuration
pub fn detect_git_user() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Pick a superlative for `seed`; the same seed always gives the same word
pub fn superlative(seed: &str) -> &'static str {
    let hash = seed
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    SUPERLATIVES[hash % SUPERLATIVES.len()]
}

/// Default project description
pub fn default_description(seed: &str) -> String {
    format!("My {} Nuxt.js project", superlative(seed))
}
