//! Answer set types
//!
//! Every option the generator asks about is a variant of [`OptionKey`], and
//! every single-choice option has its own enum. Answers are therefore checked
//! against the closed schema when they are loaded, and the resolver only ever
//! sees an [`AnswerSet`] that is complete and valid.

use crate::config::defaults::DefaultContext;
use crate::config::prompts::Prompt;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! choice_enum {
    (@display $value:literal) => {
        $value
    };
    (@display $value:literal, $display:literal) => {
        $display
    };
    (
        $(#[$meta:meta])*
        $name:ident, $key:literal {
            $($variant:ident => $value:literal $(as $display:literal)?),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value as written in answers and filter expressions
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Label shown to the user when choosing
            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => choice_enum!(@display $value $(, $display)?),)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(ConfigError::InvalidChoice {
                        key: $key,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|c| format!("'{}'", c.as_str()))
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

choice_enum!(
    /// Custom server framework
    Server, "server" {
        None => "none",
        Express => "express",
        Koa => "koa",
        Adonis => "adonis",
        Hapi => "hapi",
        Feathers => "feathers",
        Micro => "micro",
    }
);

choice_enum!(
    /// Project source directory (empty means the project root)
    SrcDir, "srcDir" {
        Root => "" as "none",
        Src => "src",
    }
);

choice_enum!(
    /// Custom UI framework
    Ui, "ui" {
        None => "none",
        Bootstrap => "bootstrap",
        Vuetify => "vuetify",
        Bulma => "bulma",
        Tailwind => "tailwind",
        ElementUi => "element-ui",
        Buefy => "buefy",
        AntDesignVue => "ant-design-vue",
        Iview => "iview",
    }
);

choice_enum!(
    /// Rendering mode
    Mode, "mode" {
        Universal => "universal" as "Universal",
        Spa => "spa" as "Single Page App",
    }
);

choice_enum!(
    /// A no/yes switch (axios, eslint, prettier)
    Toggle, "toggle" {
        No => "no",
        Yes => "yes",
    }
);

choice_enum!(
    /// Package manager used for installing and running scripts
    PackageManager, "pm" {
        Npm => "npm",
        Yarn => "yarn",
    }
);

impl Toggle {
    pub fn is_yes(&self) -> bool {
        matches!(self, Toggle::Yes)
    }
}

/// Directory the nuxt sources go into when the server is adonis
pub const ADONIS_NUXT_DIR: &str = "resources";

/// Every option the generator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKey {
    Name,
    Description,
    Server,
    SrcDir,
    Ui,
    Mode,
    Axios,
    Eslint,
    Prettier,
    Author,
    Pm,
}

impl OptionKey {
    pub const ALL: &'static [OptionKey] = &[
        OptionKey::Name,
        OptionKey::Description,
        OptionKey::Server,
        OptionKey::SrcDir,
        OptionKey::Ui,
        OptionKey::Mode,
        OptionKey::Axios,
        OptionKey::Eslint,
        OptionKey::Prettier,
        OptionKey::Author,
        OptionKey::Pm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Name => "name",
            OptionKey::Description => "description",
            OptionKey::Server => "server",
            OptionKey::SrcDir => "srcDir",
            OptionKey::Ui => "ui",
            OptionKey::Mode => "mode",
            OptionKey::Axios => "axios",
            OptionKey::Eslint => "eslint",
            OptionKey::Prettier => "prettier",
            OptionKey::Author => "author",
            OptionKey::Pm => "pm",
        }
    }

    /// Check that `value` is acceptable for this option
    pub fn validate(&self, value: &str) -> Result<(), ConfigError> {
        match self {
            OptionKey::Name | OptionKey::Description | OptionKey::Author => Ok(()),
            OptionKey::Server => value.parse::<Server>().map(drop),
            OptionKey::SrcDir => value.parse::<SrcDir>().map(drop),
            OptionKey::Ui => value.parse::<Ui>().map(drop),
            OptionKey::Mode => value.parse::<Mode>().map(drop),
            OptionKey::Axios | OptionKey::Eslint | OptionKey::Prettier => {
                value.parse::<Toggle>().map(drop).map_err(|e| match e {
                    ConfigError::InvalidChoice {
                        value, expected, ..
                    } => ConfigError::InvalidChoice {
                        key: self.as_str(),
                        value,
                        expected,
                    },
                    other => other,
                })
            }
            OptionKey::Pm => value.parse::<PackageManager>().map(drop),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// The complete, validated answers for one generator run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    pub name: String,
    pub description: String,
    pub server: Server,
    pub src_dir: SrcDir,
    pub ui: Ui,
    pub mode: Mode,
    pub axios: Toggle,
    pub eslint: Toggle,
    pub prettier: Toggle,
    pub author: String,
    pub pm: PackageManager,
}

impl AnswerSet {
    /// Value of an option as it appears in filter expressions
    pub fn value(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::Name => &self.name,
            OptionKey::Description => &self.description,
            OptionKey::Server => self.server.as_str(),
            OptionKey::SrcDir => self.src_dir.as_str(),
            OptionKey::Ui => self.ui.as_str(),
            OptionKey::Mode => self.mode.as_str(),
            OptionKey::Axios => self.axios.as_str(),
            OptionKey::Eslint => self.eslint.as_str(),
            OptionKey::Prettier => self.prettier.as_str(),
            OptionKey::Author => &self.author,
            OptionKey::Pm => self.pm.as_str(),
        }
    }

    /// Directory the nuxt sources are placed in.
    ///
    /// Adonis keeps its frontend under `resources`, whatever `srcDir` says.
    pub fn nuxt_dir(&self) -> &str {
        match self.server {
            Server::Adonis => ADONIS_NUXT_DIR,
            _ => self.src_dir.as_str(),
        }
    }
}

/// Answers as supplied by the user, possibly incomplete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<SrcDir>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<Ui>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axios: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eslint: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prettier: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm: Option<PackageManager>,
}

impl PartialAnswers {
    /// Parse an answers file. Unknown keys and out-of-list values are rejected.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Set one answer from its raw string form
    pub fn set(&mut self, key: OptionKey, raw: &str) -> Result<(), ConfigError> {
        key.validate(raw)?;
        match key {
            OptionKey::Name => self.name = Some(raw.to_string()),
            OptionKey::Description => self.description = Some(raw.to_string()),
            OptionKey::Server => self.server = Some(raw.parse()?),
            OptionKey::SrcDir => self.src_dir = Some(raw.parse()?),
            OptionKey::Ui => self.ui = Some(raw.parse()?),
            OptionKey::Mode => self.mode = Some(raw.parse()?),
            OptionKey::Axios => self.axios = Some(raw.parse()?),
            OptionKey::Eslint => self.eslint = Some(raw.parse()?),
            OptionKey::Prettier => self.prettier = Some(raw.parse()?),
            OptionKey::Author => self.author = Some(raw.to_string()),
            OptionKey::Pm => self.pm = Some(raw.parse()?),
        }
        Ok(())
    }

    pub fn value(&self, key: OptionKey) -> Option<&str> {
        match key {
            OptionKey::Name => self.name.as_deref(),
            OptionKey::Description => self.description.as_deref(),
            OptionKey::Server => self.server.map(|v| v.as_str()),
            OptionKey::SrcDir => self.src_dir.map(|v| v.as_str()),
            OptionKey::Ui => self.ui.map(|v| v.as_str()),
            OptionKey::Mode => self.mode.map(|v| v.as_str()),
            OptionKey::Axios => self.axios.map(|v| v.as_str()),
            OptionKey::Eslint => self.eslint.map(|v| v.as_str()),
            OptionKey::Prettier => self.prettier.map(|v| v.as_str()),
            OptionKey::Author => self.author.as_deref(),
            OptionKey::Pm => self.pm.map(|v| v.as_str()),
        }
    }

    /// Layer `other` on top of these answers; values present in `other` win
    pub fn overlay(self, other: PartialAnswers) -> PartialAnswers {
        PartialAnswers {
            name: other.name.or(self.name),
            description: other.description.or(self.description),
            server: other.server.or(self.server),
            src_dir: other.src_dir.or(self.src_dir),
            ui: other.ui.or(self.ui),
            mode: other.mode.or(self.mode),
            axios: other.axios.or(self.axios),
            eslint: other.eslint.or(self.eslint),
            prettier: other.prettier.or(self.prettier),
            author: other.author.or(self.author),
            pm: other.pm.or(self.pm),
        }
    }

    /// Fill every missing answer from the prompt defaults.
    ///
    /// Prompts whose `when` guard would skip them still receive their
    /// default, so the result is always complete.
    pub fn complete(
        self,
        prompts: &[Prompt],
        ctx: &DefaultContext,
    ) -> Result<AnswerSet, ConfigError> {
        let default_of = |key: OptionKey| -> Result<String, ConfigError> {
            prompts
                .iter()
                .find(|p| p.key == key)
                .map(|p| p.default.resolve(ctx))
                .ok_or_else(|| ConfigError::UnknownKey(key.as_str().to_string()))
        };
        let text = |value: Option<String>, key: OptionKey| match value {
            Some(v) => Ok(v),
            None => default_of(key),
        };

        Ok(AnswerSet {
            name: text(self.name, OptionKey::Name)?,
            description: text(self.description, OptionKey::Description)?,
            server: choice(self.server, OptionKey::Server, &default_of)?,
            src_dir: choice(self.src_dir, OptionKey::SrcDir, &default_of)?,
            ui: choice(self.ui, OptionKey::Ui, &default_of)?,
            mode: choice(self.mode, OptionKey::Mode, &default_of)?,
            axios: choice(self.axios, OptionKey::Axios, &default_of)?,
            eslint: choice(self.eslint, OptionKey::Eslint, &default_of)?,
            prettier: choice(self.prettier, OptionKey::Prettier, &default_of)?,
            author: text(self.author, OptionKey::Author)?,
            pm: choice(self.pm, OptionKey::Pm, &default_of)?,
        })
    }
}

fn choice<T, F>(value: Option<T>, key: OptionKey, default_of: &F) -> Result<T, ConfigError>
where
    T: FromStr<Err = ConfigError>,
    F: Fn(OptionKey) -> Result<String, ConfigError>,
{
    match value {
        Some(v) => Ok(v),
        None => default_of(key)?.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::prompts::prompts;

    fn ctx() -> DefaultContext {
        DefaultContext {
            folder_name: "my-app".to_string(),
            git_user: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn test_complete_fills_defaults() {
        let ctx = ctx();
        let answers = PartialAnswers::default()
            .complete(&prompts(&ctx), &ctx)
            .unwrap();

        assert_eq!(answers.name, "my-app");
        assert_eq!(answers.author, "Jane Doe");
        assert!(answers.description.starts_with("My "));
        assert!(answers.description.ends_with(" Nuxt.js project"));
        assert_eq!(answers.server, Server::None);
        assert_eq!(answers.src_dir, SrcDir::Root);
        assert_eq!(answers.ui, Ui::None);
        assert_eq!(answers.mode, Mode::Universal);
        assert_eq!(answers.eslint, Toggle::No);
        assert_eq!(answers.pm, PackageManager::Npm);
    }

    #[test]
    fn test_supplied_answers_are_kept() {
        let ctx = ctx();
        let partial = PartialAnswers::from_yaml(
            "server: express\nsrcDir: src\nui: element-ui\npm: yarn\nauthor: Someone\n",
        )
        .unwrap();
        let answers = partial.complete(&prompts(&ctx), &ctx).unwrap();

        assert_eq!(answers.server, Server::Express);
        assert_eq!(answers.src_dir, SrcDir::Src);
        assert_eq!(answers.ui, Ui::ElementUi);
        assert_eq!(answers.pm, PackageManager::Yarn);
        assert_eq!(answers.author, "Someone");
    }

    #[test]
    fn test_unknown_answer_key_rejected() {
        let err = PartialAnswers::from_yaml("database: postgres\n").unwrap_err();
        assert!(matches!(err, ConfigError::Answers(_)));
    }

    #[test]
    fn test_out_of_list_value_rejected() {
        assert!(PartialAnswers::from_yaml("ui: materialize\n").is_err());

        let mut partial = PartialAnswers::default();
        let err = partial.set(OptionKey::Eslint, "maybe").unwrap_err();
        match err {
            ConfigError::InvalidChoice { key, value, .. } => {
                assert_eq!(key, "eslint");
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_option_key_parsing() {
        assert_eq!("srcDir".parse::<OptionKey>().unwrap(), OptionKey::SrcDir);
        assert_eq!("pm".parse::<OptionKey>().unwrap(), OptionKey::Pm);
        assert!(matches!(
            "src_dir".parse::<OptionKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_overlay_prefers_later_values() {
        let file = PartialAnswers::from_yaml("server: koa\nui: bulma\n").unwrap();
        let mut flags = PartialAnswers::default();
        flags.set(OptionKey::Server, "hapi").unwrap();

        let merged = file.overlay(flags);
        assert_eq!(merged.server, Some(Server::Hapi));
        assert_eq!(merged.ui, Some(Ui::Bulma));
    }

    #[test]
    fn test_nuxt_dir_forced_for_adonis() {
        let ctx = ctx();
        let mut partial = PartialAnswers::default();
        partial.set(OptionKey::Server, "adonis").unwrap();
        partial.set(OptionKey::SrcDir, "src").unwrap();
        let answers = partial.complete(&prompts(&ctx), &ctx).unwrap();

        assert_eq!(answers.nuxt_dir(), "resources");
        assert_eq!(answers.value(OptionKey::SrcDir), "src");
    }

    #[test]
    fn test_root_src_dir_is_empty_string() {
        assert_eq!(SrcDir::Root.as_str(), "");
        assert_eq!(SrcDir::Root.display_name(), "none");
        assert_eq!("".parse::<SrcDir>().unwrap(), SrcDir::Root);
    }
}
