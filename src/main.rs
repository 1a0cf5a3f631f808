use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pushit::cli::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
use pushit::config;
use pushit::domain::VersionBump;
use pushit::git::SystemGit;
use pushit::ui;

#[derive(clap::Parser)]
#[command(
    name = "pushit",
    version,
    about = "Tag a new module version and publish it to the site makefile",
    long_about = "Run after merging a module pull request. Bumps and tags a new version of the module repo, \
                  writes the new tag into the site makefile, and commits and pushes that change with a \
                  properly formatted commit message.\n\n\
                  PUSHIT_SITE_REPO_PATH and PUSHIT_SITE_MAKEFILE may be set instead of passing \
                  --site-repo and --site-makefile.\n\n\
                  Exit status: 0 on release or abort, 1 on any other error, \
                  2 on invalid usage, 3 when a git command failed and the repos may need attention."
)]
struct Args {
    #[arg(short = 'v', long, value_enum, default_value_t = VersionBump::Patch, help = "The semver column of the module version to bump")]
    bump: VersionBump,

    #[arg(long, help = "The path to the module with changes to push [default: current directory]")]
    module: Option<PathBuf>,

    #[arg(short = 'r', long, help = "The path to your site repo where the makefile resides")]
    site_repo: Option<PathBuf>,

    #[arg(long, help = "Filename of the *.make file to alter")]
    site_makefile: Option<String>,

    #[arg(
        long,
        help = "If you have already merged your topic branch, its name (eg. NCAA-31337); otherwise the current branch is used"
    )]
    topic: Option<String>,

    #[arg(long, help = "Do not require a <module>.module file in the module directory")]
    no_module: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,
}

/// Exit status for a failed git command; clap already uses 2 for usage errors.
const EXIT_GIT_FAILURE: u8 = 3;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<pushit::PushitError>() {
                Some(err) => {
                    if let Some(output) = err.command_output() {
                        ui::display_command_output(output);
                    }
                    ui::display_error(&err.to_string());
                    if err.is_fatal() {
                        ExitCode::from(EXIT_GIT_FAILURE)
                    } else {
                        ExitCode::from(1)
                    }
                }
                None => {
                    ui::display_error(&format!("{:#}", e));
                    ExitCode::from(1)
                }
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;

    let module_dir = match args.module {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    let workflow_args = PublishWorkflowArgs {
        bump: args.bump,
        module_dir,
        site_repo: config.site_repo_from_env(args.site_repo),
        site_makefile: config.site_makefile_from_env(args.site_makefile),
        topic: args.topic,
        no_module: args.no_module,
    };
    log::debug!("workflow arguments: {:?}", workflow_args);

    let git = SystemGit::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let result = run_publish_workflow(&workflow_args, &config, &git, &mut input, &mut output)?;
    output.flush()?;

    if let WorkflowResult::Published(summary) = result {
        log::info!("released {} of {}", summary.tag, summary.module);
    }

    Ok(())
}
