//! Source to destination path mapping
//!
//! The mapping is assembled from several layers. Each layer is merged on top
//! of the previous ones and wins on a shared source path.

use crate::answers::{AnswerSet, Server};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Directory holding the framework-specific subtrees
pub const FRAMEWORKS_DIR: &str = "frameworks";

/// Directory holding the nuxt application sources
pub const NUXT_DIR: &str = "nuxt";

/// Renames applied before anything else
const FIXED_RENAMES: &[(&str, &str)] = &[
    ("gitignore", ".gitignore"),
    ("_package.json", "package.json"),
    ("_.eslintrc.js", ".eslintrc.js"),
    ("server/index-*.js", "server/index.js"),
];

/// Renames applied last when the server is adonis
const ADONIS_POST_MOVES: &[(&str, &str)] = &[
    ("server/index-*.js", "server.js"),
    ("nuxt/nuxt.config.js", "config/nuxt.js"),
];

/// Renames applied last for every other server
const DEFAULT_POST_MOVES: &[(&str, &str)] = &[("nuxt/nuxt.config.js", "nuxt.config.js")];

/// Template-relative source path to project-relative destination path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathMapping(BTreeMap<String, String>);

impl PathMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.0.insert(source.into(), destination.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.0.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    /// Merge `layer` into this mapping. Entries of `layer` override.
    pub fn merge(&mut self, layer: PathMapping) {
        for (source, destination) in layer.0 {
            if let Some(previous) = self.0.get(&source) {
                if *previous != destination {
                    tracing::debug!(
                        source = %source,
                        previous = %previous,
                        destination = %destination,
                        "mapping overridden by later layer"
                    );
                }
            }
            self.0.insert(source, destination);
        }
    }

    /// Merge an optional layer; `None` contributes nothing
    pub fn merge_optional(&mut self, layer: Option<PathMapping>) {
        if let Some(layer) = layer {
            self.merge(layer);
        }
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for PathMapping {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(s, d)| (s.into(), d.into()))
                .collect(),
        )
    }
}

impl IntoIterator for PathMapping {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// List every file under `prefix` (empty for the whole tree), relative to
/// `template_root` with `/` separators. Dotfiles included, directories not.
pub fn list_files(template_root: &Path, prefix: &str) -> Result<Vec<String>> {
    let dir = if prefix.is_empty() {
        template_root.to_path_buf()
    } else {
        template_root.join(prefix)
    };
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&dir).follow_links(true) {
        let entry = entry
            .with_context(|| format!("Failed to read template directory {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(template_root).with_context(|| {
            format!(
                "Template file {} is outside {}",
                entry.path().display(),
                template_root.display()
            )
        })?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        files.push(parts.join("/"));
    }
    files.sort();

    Ok(files)
}

/// Re-root every file under `source_prefix` below `dest_prefix`.
///
/// An empty `dest_prefix` places the files at the project root. A prefix
/// with no files yields an empty mapping.
pub fn expand(template_root: &Path, source_prefix: &str, dest_prefix: &str) -> Result<PathMapping> {
    let strip = format!("{}/", source_prefix);
    let files = list_files(template_root, source_prefix)?;
    tracing::debug!(
        prefix = source_prefix,
        files = files.len(),
        "expanding template subtree"
    );

    Ok(files
        .into_iter()
        .map(|file| {
            let rest = file.strip_prefix(&strip).unwrap_or(&file).to_string();
            let destination = if dest_prefix.is_empty() {
                rest
            } else {
                format!("{}/{}", dest_prefix, rest)
            };
            (file, destination)
        })
        .collect())
}

/// Expand `frameworks/<choice>`, or nothing when the choice is `none`
pub fn select_framework(
    template_root: &Path,
    choice: &str,
    dest_prefix: &str,
) -> Result<Option<PathMapping>> {
    if choice == "none" {
        return Ok(None);
    }
    let prefix = format!("{}/{}", FRAMEWORKS_DIR, choice);
    expand(template_root, &prefix, dest_prefix).map(Some)
}

/// Compute the full path mapping for `answers`
pub fn resolve(template_root: &Path, answers: &AnswerSet) -> Result<PathMapping> {
    if !template_root.is_dir() {
        anyhow::bail!("Template directory not found: {}", template_root.display());
    }
    let nuxt_dir = answers.nuxt_dir();

    let mut mapping: PathMapping = FIXED_RENAMES.iter().copied().collect();
    mapping.merge(expand(template_root, NUXT_DIR, nuxt_dir)?);
    mapping.merge_optional(select_framework(
        template_root,
        answers.server.as_str(),
        "",
    )?);
    mapping.merge_optional(select_framework(
        template_root,
        answers.ui.as_str(),
        nuxt_dir,
    )?);

    let post_moves = match answers.server {
        Server::Adonis => ADONIS_POST_MOVES,
        _ => DEFAULT_POST_MOVES,
    };
    mapping.merge(post_moves.iter().copied().collect());

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Mode, PackageManager, SrcDir, Toggle, Ui};
    use std::fs;
    use tempfile::TempDir;

    fn template(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        dir
    }

    fn answers(server: Server, src_dir: SrcDir, ui: Ui) -> AnswerSet {
        AnswerSet {
            name: "app".to_string(),
            description: String::new(),
            server,
            src_dir,
            ui,
            mode: Mode::Universal,
            axios: Toggle::No,
            eslint: Toggle::No,
            prettier: Toggle::No,
            author: String::new(),
            pm: PackageManager::Npm,
        }
    }

    const TREE: &[&str] = &[
        "gitignore",
        "_package.json",
        "_.eslintrc.js",
        "nuxt/nuxt.config.js",
        "nuxt/pages/index.vue",
        "nuxt/.eslintignore",
        "server/index-express.js",
        "server/index-adonis.js",
        "frameworks/adonis/start/routes.js",
        "frameworks/express/README.md",
        "frameworks/vuetify/plugins/vuetify.js",
    ];

    #[test]
    fn test_expand_strips_prefix() {
        let dir = template(TREE);
        let mapping = expand(dir.path(), "nuxt", "src").unwrap();

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("nuxt/pages/index.vue"), Some("src/pages/index.vue"));
        assert_eq!(mapping.get("nuxt/.eslintignore"), Some("src/.eslintignore"));
    }

    #[test]
    fn test_expand_to_root() {
        let dir = template(TREE);
        let mapping = expand(dir.path(), "frameworks/express", "").unwrap();
        assert_eq!(mapping.get("frameworks/express/README.md"), Some("README.md"));
    }

    #[test]
    fn test_expand_missing_prefix_is_empty() {
        let dir = template(TREE);
        assert!(expand(dir.path(), "frameworks/koa", "").unwrap().is_empty());
    }

    #[test]
    fn test_select_framework_none() {
        let dir = template(TREE);
        assert!(select_framework(dir.path(), "none", "src").unwrap().is_none());
        assert!(select_framework(dir.path(), "vuetify", "src").unwrap().is_some());
    }

    #[test]
    fn test_merge_later_layer_wins() {
        let mut mapping: PathMapping = [("a", "x"), ("b", "y")].into_iter().collect();
        mapping.merge([("b", "z"), ("c", "w")].into_iter().collect());
        mapping.merge_optional(None);

        assert_eq!(mapping.get("a"), Some("x"));
        assert_eq!(mapping.get("b"), Some("z"));
        assert_eq!(mapping.get("c"), Some("w"));
    }

    #[test]
    fn test_adonis_post_moves_override_fixed_renames() {
        let dir = template(TREE);
        let answers = answers(Server::Adonis, SrcDir::Root, Ui::None);
        let mapping = resolve(dir.path(), &answers).unwrap();

        assert_eq!(mapping.get("server/index-*.js"), Some("server.js"));
        assert_eq!(mapping.get("nuxt/nuxt.config.js"), Some("config/nuxt.js"));
        assert_eq!(
            mapping.get("frameworks/adonis/start/routes.js"),
            Some("start/routes.js")
        );
    }

    #[test]
    fn test_adonis_ignores_src_dir() {
        let dir = template(TREE);
        let answers = answers(Server::Adonis, SrcDir::Src, Ui::Vuetify);
        let mapping = resolve(dir.path(), &answers).unwrap();

        assert_eq!(
            mapping.get("nuxt/pages/index.vue"),
            Some("resources/pages/index.vue")
        );
        assert_eq!(
            mapping.get("frameworks/vuetify/plugins/vuetify.js"),
            Some("resources/plugins/vuetify.js")
        );
        assert!(mapping.iter().all(|(_, d)| !d.starts_with("src/")));
    }

    #[test]
    fn test_no_server_contributes_no_framework_entries() {
        let dir = template(TREE);
        let answers = answers(Server::None, SrcDir::Root, Ui::None);
        let mapping = resolve(dir.path(), &answers).unwrap();

        assert!(mapping.iter().all(|(s, _)| !s.starts_with("frameworks/")));
        assert_eq!(mapping.get("server/index-*.js"), Some("server/index.js"));
        assert_eq!(mapping.get("nuxt/nuxt.config.js"), Some("nuxt.config.js"));
        assert_eq!(mapping.get("nuxt/pages/index.vue"), Some("pages/index.vue"));
    }

    #[test]
    fn test_ui_framework_follows_src_dir() {
        let dir = template(TREE);
        let answers = answers(Server::None, SrcDir::Src, Ui::Vuetify);
        let mapping = resolve(dir.path(), &answers).unwrap();

        for file in list_files(dir.path(), "frameworks/vuetify").unwrap() {
            let expected = format!("src/{}", file.trim_start_matches("frameworks/vuetify/"));
            assert_eq!(mapping.get(&file), Some(expected.as_str()));
        }
    }

    #[test]
    fn test_fixed_renames_always_present() {
        let dir = template(TREE);
        let answers = answers(Server::Koa, SrcDir::Root, Ui::None);
        let mapping = resolve(dir.path(), &answers).unwrap();

        assert_eq!(mapping.get("gitignore"), Some(".gitignore"));
        assert_eq!(mapping.get("_package.json"), Some("package.json"));
        assert_eq!(mapping.get("_.eslintrc.js"), Some(".eslintrc.js"));
    }

    #[test]
    fn test_missing_template_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let answers = answers(Server::None, SrcDir::Root, Ui::Vuetify);
        assert!(resolve(&dir.path().join("missing"), &answers).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_aborts_resolution() {
        let dir = template(TREE);
        std::os::unix::fs::symlink(
            dir.path().join("nuxt/gone.vue"),
            dir.path().join("nuxt/pages/broken.vue"),
        )
        .unwrap();

        let answers = answers(Server::Express, SrcDir::Src, Ui::None);
        assert!(resolve(dir.path(), &answers).is_err());
    }

    #[test]
    fn test_list_files_whole_tree() {
        let dir = template(TREE);
        let files = list_files(dir.path(), "").unwrap();
        assert_eq!(files.len(), TREE.len());
        assert!(files.contains(&"nuxt/.eslintignore".to_string()));
    }
}
