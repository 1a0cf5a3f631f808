//! Main workflow orchestration logic
//!
//! Sequences a release: resolve the module and site makefile, work out the
//! next version, ask the operator, then run the module release and site
//! publish together. Kept apart from `main.rs` so the workflow can be driven
//! without clap, a terminal, or a real git.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{locate_makefile, ModuleRef, VersionBump};
use crate::error::Result;
use crate::git::{GitRunner, SerialGit};
use crate::manifest::{Manifest, PinUpdate};
use crate::publish::{self, ModuleReleaseTask, SitePublishTask};
use crate::resolver::VersionResolver;
use crate::ui;

/// Arguments for the publish workflow, already resolved against the
/// environment and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    /// Semver column to bump
    pub bump: VersionBump,

    /// Module working directory
    pub module_dir: PathBuf,

    /// Site repo working directory
    pub site_repo: PathBuf,

    /// Makefile name inside the site repo
    pub site_makefile: String,

    /// Topic branch, when already merged
    pub topic: Option<String>,

    /// Skip the `<module>.module` check
    pub no_module: bool,
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    ModuleResolved,
    MakefileLocated,
    VersionResolved,
    AwaitingConfirmation,
    Releasing,
    Published,
    Aborted,
    Failed,
}

/// What a completed release did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub module: String,
    pub topic: String,
    pub tag: String,
    pub commit_message: String,
    pub deleted_topic: Option<String>,
}

/// Result of a workflow that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowResult {
    Published(ReleaseSummary),
    /// The operator declined; nothing was changed
    Aborted,
}

/// Commit message for the site repo
pub fn commit_message(topic: &str, module: &str, version: &str) -> String {
    format!("{} {} -> {}", topic, module, version)
}

/// Drives one release through [RunState].
pub struct Orchestrator<'a> {
    runner: &'a dyn GitRunner,
    config: &'a Config,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(runner: &'a dyn GitRunner, config: &'a Config) -> Self {
        Orchestrator {
            runner,
            config,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn advance(&mut self, next: RunState) {
        log::debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the workflow, reading the confirmation from `input`.
    ///
    /// Any error leaves the orchestrator in [RunState::Failed].
    pub fn run(
        &mut self,
        args: &PublishWorkflowArgs,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<WorkflowResult> {
        let result = self.execute(args, input, output);
        if result.is_err() {
            self.advance(RunState::Failed);
        }
        result
    }

    fn execute(
        &mut self,
        args: &PublishWorkflowArgs,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<WorkflowResult> {
        let config = self.config;
        let git = SerialGit::new(self.runner);
        let git_config = &config.git;

        let module = ModuleRef::resolve(&args.module_dir, args.no_module)?;
        if args.no_module {
            ui::display_boundary_warning(&BoundaryWarning::ModuleMarkerSkipped {
                module: module.name.clone(),
            });
        }
        ui::display_status(&format!("Module repo: {}", module.name));
        self.advance(RunState::ModuleResolved);

        let makefile_path = locate_makefile(&args.site_repo, &args.site_makefile)?;
        self.advance(RunState::MakefileLocated);

        let resolution = VersionResolver::new(&git, git_config).resolve(
            &module.dir,
            args.bump,
            args.topic.as_deref(),
        )?;
        let next = resolution.next.to_string();
        self.advance(RunState::VersionResolved);

        ui::display_proposed_version(&module.name, &resolution.current_tag, &next);
        self.advance(RunState::AwaitingConfirmation);

        if !ui::confirm_release(&next, input, output)? {
            ui::display_status("Aborting...");
            self.advance(RunState::Aborted);
            return Ok(WorkflowResult::Aborted);
        }
        self.advance(RunState::Releasing);

        // Checked against the local makefile first so a stale site repo is
        // reported before anything is tagged. The site task applies it again
        // after fast-forwarding.
        let update = PinUpdate::new(
            module.name.clone(),
            resolution.current_tag.clone(),
            next.clone(),
        );
        let rewrite = update.apply(&Manifest::load(&makefile_path)?)?;
        if rewrite.matches > 1 {
            ui::display_boundary_warning(&BoundaryWarning::DuplicateManifestEntries {
                module: module.name.clone(),
                tag: resolution.current_tag.clone(),
                count: rewrite.matches,
            });
        }

        let message = commit_message(&resolution.topic, &module.name, &next);

        let module_task = ModuleReleaseTask {
            runner: &git,
            git: git_config,
            module_dir: &module.dir,
            topic: &resolution.topic,
            version: resolution.next,
        };
        let site_task = SitePublishTask {
            runner: &git,
            git: git_config,
            site_dir: &args.site_repo,
            makefile: &args.site_makefile,
        };
        let outcome = publish::release(module_task, site_task, &update, &message)?;
        self.advance(RunState::Published);

        ui::display_success(
            "Push completed successfully! Your new version will build to the staging environment momentarily.",
        );

        Ok(WorkflowResult::Published(ReleaseSummary {
            module: module.name,
            topic: resolution.topic,
            tag: outcome.tag,
            commit_message: message,
            deleted_topic: outcome.deleted_topic,
        }))
    }
}

/// Run a full release with the given runner and operator input.
pub fn run_publish_workflow(
    args: &PublishWorkflowArgs,
    config: &Config,
    runner: &dyn GitRunner,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<WorkflowResult> {
    Orchestrator::new(runner, config).run(args, input, output)
}
