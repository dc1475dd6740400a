// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! detail: structured release notes stored next to your code
//!
//! Creates notes, lints them in CI, and renders them as a changelog.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use detail_cli::commands::{self, LogOptions, Output};
use detail_cli::config::{Command, Config, join_range};
use detail_cli::prompt::LinePrompter;
use detail_core::{DefaultsPrompter, GITHUB_PR, PullRequestBase, Workspace};
use detail_github::GithubClient;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    config.validate()?;
    let Some(command) = config.command.clone() else {
        Config::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let root = config.root_path();
    let workspace = Workspace::discover(&root)
        .with_context(|| format!("{} is not inside a git repository", root.display()))?;
    debug!(root = %workspace.root().display(), "Discovered workspace");

    match command {
        Command::New { path, defaults } => {
            let path = if defaults {
                commands::new_note(&workspace, path.as_deref(), &mut DefaultsPrompter)?
            } else {
                let mut prompter = LinePrompter::new(io::stdin().lock(), io::stderr());
                commands::new_note(&workspace, path.as_deref(), &mut prompter)?
            };
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Lint {
            range,
            json,
            no_fetch,
        } => {
            let range = join_range(&range);
            let github = github_for(&workspace, range == GITHUB_PR)?;
            let outcome =
                commands::lint_range(&workspace, &range, json, !no_fetch, lookup(&github))?;
            print!("{}", outcome.text);
            Ok(if outcome.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Log {
            range,
            tag_match,
            before,
            after,
            reverse,
            json,
            output,
            no_fetch,
        } => {
            let options = LogOptions {
                range: join_range(&range),
                tag_match,
                before,
                after,
                reverse,
                json,
                fetch: !no_fetch,
            };
            let output = Output::parse(output.as_deref());
            let github = github_for(
                &workspace,
                options.range == GITHUB_PR || output == Output::PullRequestComment,
            )?;
            let text = commands::render_log(&workspace, &options, lookup(&github))?;

            match output {
                Output::Stdout => io::stdout().write_all(text.as_bytes())?,
                Output::File(path) => {
                    std::fs::write(&path, &text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Wrote changelog");
                }
                Output::PullRequestComment => {
                    let client = github
                        .as_ref()
                        .context("GitHub client was not configured")?;
                    client
                        .comment(&text)
                        .context("Failed to comment on the pull request")?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// A GitHub client, built only when the command talks to GitHub
fn github_for(workspace: &Workspace, needed: bool) -> Result<Option<GithubClient>> {
    if !needed {
        return Ok(None);
    }
    detail_github::from_env(workspace.git())
        .map(Some)
        .context("Failed to configure GitHub access")
}

fn lookup(github: &Option<GithubClient>) -> Option<&dyn PullRequestBase> {
    github.as_ref().map(|client| client as &dyn PullRequestBase)
}
