//! create-nuxt-app - Plan and finish Nuxt.js project scaffolds

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use nuxt_scaffold::config::{self, DefaultContext};
use nuxt_scaffold::{
    run_post, OptionKey, PartialAnswers, PostContext, Resolver, ScaffoldConfig, SystemTools,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "create-nuxt-app")]
#[command(about = "Resolve prompts, file filters and moves for a new Nuxt.js project")]
#[command(version)]
pub struct Args {
    /// Template directory (defaults to $CREATE_NUXT_TEMPLATE_DIR, then ./template)
    #[arg(long = "template-dir", global = true)]
    pub template_dir: Option<PathBuf>,

    /// Scaffold against the edge release of Nuxt
    #[arg(long, global = true)]
    pub edge: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the prompt schema as YAML
    Prompts(PromptsArgs),
    /// Print the render plan (answers, filters and destinations) as YAML
    Plan(PlanArgs),
    /// Run the post-generation steps in a generated project
    Post(PostArgs),
}

#[derive(ClapArgs, Debug)]
pub struct PromptsArgs {
    /// Project folder used to compute defaults
    #[arg(long, default_value = ".")]
    pub folder: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct PlanArgs {
    /// Project folder the plan is for
    #[arg(long, default_value = ".")]
    pub folder: PathBuf,

    #[command(flatten)]
    pub answers: AnswerArgs,
}

#[derive(ClapArgs, Debug)]
pub struct PostArgs {
    /// Generated project folder
    #[arg(long)]
    pub folder: PathBuf,

    /// The folder was created by the generator
    #[arg(long = "new-folder")]
    pub new_folder: bool,

    #[command(flatten)]
    pub answers: AnswerArgs,
}

/// Answers given on the command line; they override the answers file
#[derive(ClapArgs, Debug, Default)]
pub struct AnswerArgs {
    /// YAML file with answers keyed by option name
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Server framework (none, express, koa, adonis, hapi, feathers, micro)
    #[arg(long)]
    pub server: Option<String>,

    /// Source directory ("" or src)
    #[arg(long = "src-dir")]
    pub src_dir: Option<String>,

    /// UI framework (none, bootstrap, vuetify, bulma, tailwind, element-ui, buefy, ant-design-vue, iview)
    #[arg(long)]
    pub ui: Option<String>,

    /// Rendering mode (universal, spa)
    #[arg(long)]
    pub mode: Option<String>,

    /// Use the axios module (no, yes)
    #[arg(long)]
    pub axios: Option<String>,

    /// Use eslint (no, yes)
    #[arg(long)]
    pub eslint: Option<String>,

    /// Use prettier (no, yes)
    #[arg(long)]
    pub prettier: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Package manager (npm, yarn)
    #[arg(long)]
    pub pm: Option<String>,
}

impl AnswerArgs {
    /// Load the answers file, apply flags on top and fill in defaults
    fn load(&self, folder: &Path) -> Result<nuxt_scaffold::AnswerSet> {
        let from_file = match &self.answers {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                PartialAnswers::from_yaml(&content)
                    .with_context(|| format!("Invalid answers in {}", path.display()))?
            }
            None => PartialAnswers::default(),
        };

        let mut from_flags = PartialAnswers::default();
        for (key, value) in [
            (OptionKey::Name, &self.name),
            (OptionKey::Description, &self.description),
            (OptionKey::Server, &self.server),
            (OptionKey::SrcDir, &self.src_dir),
            (OptionKey::Ui, &self.ui),
            (OptionKey::Mode, &self.mode),
            (OptionKey::Axios, &self.axios),
            (OptionKey::Eslint, &self.eslint),
            (OptionKey::Prettier, &self.prettier),
            (OptionKey::Author, &self.author),
            (OptionKey::Pm, &self.pm),
        ] {
            if let Some(value) = value {
                from_flags.set(key, value)?;
            }
        }

        let ctx = DefaultContext::detect(folder);
        let answers = from_file
            .overlay(from_flags)
            .complete(&config::prompts(&ctx), &ctx)?;
        tracing::debug!(?answers, "answers resolved");

        Ok(answers)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Fixed once here and passed down
    let scaffold = ScaffoldConfig::resolve(args.template_dir, args.edge);

    match args.command {
        Command::Prompts(prompts_args) => {
            let ctx = DefaultContext::detect(&prompts_args.folder);
            print!("{}", serde_yaml::to_string(&config::prompts(&ctx))?);
            Ok(())
        }
        Command::Plan(plan_args) => {
            let answers = plan_args.answers.load(&plan_args.folder)?;
            let resolver = Resolver::new(scaffold)?;
            let plan = resolver.plan(&answers)?;
            print!("{}", serde_yaml::to_string(&plan)?);
            Ok(())
        }
        Command::Post(post_args) => {
            if !post_args.folder.is_dir() {
                anyhow::bail!("Project folder not found: {}", post_args.folder.display());
            }
            let answers = post_args.answers.load(&post_args.folder)?;
            let ctx = PostContext {
                is_new_folder: post_args.new_folder,
                folder_name: config::defaults::folder_name(&post_args.folder),
                folder_path: post_args.folder,
            };
            let mut tools = SystemTools::new(true);
            run_post(&mut tools, &ctx, &answers, &mut std::io::stdout().lock())
        }
    }
}
