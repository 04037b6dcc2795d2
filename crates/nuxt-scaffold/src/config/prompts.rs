//! Prompt schema
//!
//! The questions a prompt renderer asks before resolution. Rendering them is
//! someone else's job; this module only describes them and resolves their
//! defaults.

use super::defaults::{default_description, DefaultContext};
use crate::answers::{
    Mode, OptionKey, PackageManager, PartialAnswers, Server, SrcDir, Toggle, Ui,
};
use serde::{Serialize, Serializer};

/// Sentinel understood by prompt renderers as "the project folder name"
pub const FOLDER_NAME_SENTINEL: &str = ":folderName:";

/// Sentinel understood by prompt renderers as "the git user name"
pub const GIT_USER_SENTINEL: &str = ":gitUser:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Free text
    Input,
    /// Single choice from a list
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub name: &'static str,
    pub value: &'static str,
}

/// Default value of a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptDefault {
    Text(String),
    FolderName,
    GitUser,
}

impl PromptDefault {
    pub fn resolve(&self, ctx: &DefaultContext) -> String {
        match self {
            PromptDefault::Text(text) => text.clone(),
            PromptDefault::FolderName => ctx.folder_name.clone(),
            PromptDefault::GitUser => ctx.git_user.clone(),
        }
    }
}

impl Serialize for PromptDefault {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PromptDefault::Text(text) => serializer.serialize_str(text),
            PromptDefault::FolderName => serializer.serialize_str(FOLDER_NAME_SENTINEL),
            PromptDefault::GitUser => serializer.serialize_str(GIT_USER_SENTINEL),
        }
    }
}

/// Condition under which a prompt is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Guard {
    /// Ask only if the earlier answer for `key` differs from `value`
    NotEquals { key: OptionKey, value: &'static str },
}

impl Guard {
    /// Whether the prompt should be asked given the answers collected so far
    pub fn allows(&self, answers: &PartialAnswers) -> bool {
        match self {
            Guard::NotEquals { key, value } => answers.value(*key) != Some(*value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub key: OptionKey,
    pub message: &'static str,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    pub default: PromptDefault,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<Guard>,
    /// Remember the answer for the next run
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub store: bool,
}

impl Prompt {
    fn input(key: OptionKey, message: &'static str, default: PromptDefault) -> Self {
        Self {
            key,
            message,
            kind: PromptKind::Input,
            choices: Vec::new(),
            default,
            when: None,
            store: false,
        }
    }

    fn list(key: OptionKey, message: &'static str, choices: Vec<Choice>, default: &str) -> Self {
        Self {
            key,
            message,
            kind: PromptKind::List,
            choices,
            default: PromptDefault::Text(default.to_string()),
            when: None,
            store: false,
        }
    }

    fn when(mut self, guard: Guard) -> Self {
        self.when = Some(guard);
        self
    }

    fn stored(mut self) -> Self {
        self.store = true;
        self
    }

    /// Whether this prompt is asked given the answers collected so far
    pub fn is_asked(&self, answers: &PartialAnswers) -> bool {
        self.when.map_or(true, |guard| guard.allows(answers))
    }
}

macro_rules! choices {
    ($ty:ty) => {
        <$ty>::ALL
            .iter()
            .map(|c| Choice {
                name: c.display_name(),
                value: c.as_str(),
            })
            .collect::<Vec<_>>()
    };
}

/// The ordered prompt schema
pub fn prompts(ctx: &DefaultContext) -> Vec<Prompt> {
    vec![
        Prompt::input(OptionKey::Name, "Project name", PromptDefault::FolderName),
        Prompt::input(
            OptionKey::Description,
            "Project description",
            PromptDefault::Text(default_description(&ctx.folder_name)),
        ),
        Prompt::list(
            OptionKey::Server,
            "Use a custom server framework",
            choices!(Server),
            Server::None.as_str(),
        ),
        Prompt::list(
            OptionKey::SrcDir,
            "Choose project source directory",
            choices!(SrcDir),
            SrcDir::Root.as_str(),
        )
        .when(Guard::NotEquals {
            key: OptionKey::Server,
            value: Server::Adonis.as_str(),
        }),
        Prompt::list(
            OptionKey::Ui,
            "Use a custom UI framework",
            choices!(Ui),
            Ui::None.as_str(),
        ),
        Prompt::list(
            OptionKey::Mode,
            "Choose rendering mode",
            choices!(Mode),
            Mode::Universal.as_str(),
        ),
        Prompt::list(
            OptionKey::Axios,
            "Use axios module",
            choices!(Toggle),
            Toggle::No.as_str(),
        ),
        Prompt::list(
            OptionKey::Eslint,
            "Use eslint",
            choices!(Toggle),
            Toggle::No.as_str(),
        ),
        Prompt::list(
            OptionKey::Prettier,
            "Use prettier",
            choices!(Toggle),
            Toggle::No.as_str(),
        ),
        Prompt::input(OptionKey::Author, "Author name", PromptDefault::GitUser).stored(),
        Prompt::list(
            OptionKey::Pm,
            "Choose a package manager",
            choices!(PackageManager),
            PackageManager::Npm.as_str(),
        ),
    ]
}
