//! Post-generation hook

use crate::answers::{AnswerSet, PackageManager};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Process handles the hook drives
pub trait ProjectTools {
    /// Initialize a git repository in `dir`
    fn git_init(&mut self, dir: &Path) -> Result<()>;

    /// Install dependencies with npm
    fn npm_install(&mut self, dir: &Path) -> Result<()>;

    /// Install dependencies with yarn
    fn yarn_install(&mut self, dir: &Path) -> Result<()>;

    /// Run `<pm> run lint -- --fix` in `dir` and wait for it.
    /// Returns the exit code, if the process reported one.
    fn lint_fix(&mut self, pm: PackageManager, dir: &Path) -> Result<Option<i32>>;
}

/// Where the project was generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContext {
    /// The generator created the folder (as opposed to using the current one)
    pub is_new_folder: bool,
    pub folder_name: String,
    pub folder_path: PathBuf,
}

/// Run the post-generation steps and print the getting-started instructions
pub fn run_post<T, W>(
    tools: &mut T,
    ctx: &PostContext,
    answers: &AnswerSet,
    out: &mut W,
) -> Result<()>
where
    T: ProjectTools + ?Sized,
    W: Write,
{
    let dir = ctx.folder_path.as_path();

    if let Err(e) = tools.git_init(dir) {
        tracing::warn!(error = %e, "git init failed");
    }

    let installed = match answers.pm {
        PackageManager::Yarn => tools.yarn_install(dir),
        PackageManager::Npm => tools.npm_install(dir),
    };
    if let Err(e) = installed {
        tracing::warn!(error = %e, pm = %answers.pm, "dependency install failed");
    }

    if answers.eslint.is_yes() {
        // Lint failures never stop the hook
        match tools.lint_fix(answers.pm, dir) {
            Ok(code) => tracing::debug!(?code, "lint fix finished"),
            Err(e) => tracing::warn!(error = %e, "lint fix could not run"),
        }
    }

    print_instructions(ctx, answers.pm, out)?;

    Ok(())
}

/// Print how to start the generated project
pub fn print_instructions<W: Write>(
    ctx: &PostContext,
    pm: PackageManager,
    out: &mut W,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "\tTo get started:\n".bold())?;
    write_cd(ctx, out)?;
    writeln!(out, "\t {} run dev\n", pm)?;
    writeln!(out, "{}", "  To build & start for production:\n".bold())?;
    write_cd(ctx, out)?;
    writeln!(out, "\t {} run build", pm)?;
    writeln!(out, "\t {} start", pm)?;
    writeln!(out)?;

    Ok(())
}

fn write_cd<W: Write>(ctx: &PostContext, out: &mut W) -> std::io::Result<()> {
    if ctx.is_new_folder {
        writeln!(out, "\t{} {}", "cd".cyan(), ctx.folder_name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Mode, Server, SrcDir, Toggle, Ui};

    #[derive(Default)]
    struct RecordingTools {
        calls: Vec<String>,
        fail_git: bool,
        fail_install: bool,
        lint_exit: Option<i32>,
    }

    impl ProjectTools for RecordingTools {
        fn git_init(&mut self, _dir: &Path) -> Result<()> {
            self.calls.push("git init".to_string());
            if self.fail_git {
                anyhow::bail!("git not found");
            }
            Ok(())
        }

        fn npm_install(&mut self, _dir: &Path) -> Result<()> {
            self.calls.push("npm install".to_string());
            if self.fail_install {
                anyhow::bail!("npm exited with code 1");
            }
            Ok(())
        }

        fn yarn_install(&mut self, _dir: &Path) -> Result<()> {
            self.calls.push("yarn install".to_string());
            Ok(())
        }

        fn lint_fix(&mut self, pm: PackageManager, _dir: &Path) -> Result<Option<i32>> {
            self.calls.push(format!("{} run lint -- --fix", pm));
            Ok(self.lint_exit)
        }
    }

    fn answers(pm: PackageManager, eslint: Toggle) -> AnswerSet {
        AnswerSet {
            name: "app".to_string(),
            description: String::new(),
            server: Server::Express,
            src_dir: SrcDir::Src,
            ui: Ui::None,
            mode: Mode::Universal,
            axios: Toggle::No,
            eslint,
            prettier: Toggle::No,
            author: String::new(),
            pm,
        }
    }

    fn ctx(is_new_folder: bool) -> PostContext {
        PostContext {
            is_new_folder,
            folder_name: "my-app".to_string(),
            folder_path: PathBuf::from("/tmp/my-app"),
        }
    }

    #[test]
    fn test_yarn_with_lint_fix() {
        let mut tools = RecordingTools::default();
        let mut out = Vec::new();
        run_post(
            &mut tools,
            &ctx(true),
            &answers(PackageManager::Yarn, Toggle::Yes),
            &mut out,
        )
        .unwrap();

        assert_eq!(
            tools.calls,
            vec!["git init", "yarn install", "yarn run lint -- --fix"]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("yarn run dev"));
        assert!(text.contains("yarn run build"));
        assert!(text.contains("yarn start"));
    }

    #[test]
    fn test_npm_without_lint() {
        let mut tools = RecordingTools::default();
        let mut out = Vec::new();
        run_post(
            &mut tools,
            &ctx(false),
            &answers(PackageManager::Npm, Toggle::No),
            &mut out,
        )
        .unwrap();

        assert_eq!(tools.calls, vec!["git init", "npm install"]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("npm run dev"));
        assert!(!text.contains("my-app"));
    }

    #[test]
    fn test_failed_lint_still_prints_instructions() {
        let mut tools = RecordingTools {
            lint_exit: Some(1),
            fail_git: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        run_post(
            &mut tools,
            &ctx(true),
            &answers(PackageManager::Npm, Toggle::Yes),
            &mut out,
        )
        .unwrap();

        assert_eq!(tools.calls.len(), 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("To get started:"));
        assert!(text.contains("npm start"));
    }

    #[test]
    fn test_failed_install_still_prints_instructions() {
        let mut tools = RecordingTools {
            fail_install: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        run_post(
            &mut tools,
            &ctx(true),
            &answers(PackageManager::Npm, Toggle::Yes),
            &mut out,
        )
        .unwrap();

        assert_eq!(
            tools.calls,
            vec!["git init", "npm install", "npm run lint -- --fix"]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("npm run dev"));
    }

    #[test]
    fn test_cd_shown_for_new_folder() {
        let mut out = Vec::new();
        print_instructions(&ctx(true), PackageManager::Npm, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("my-app").count(), 2);
    }
}
