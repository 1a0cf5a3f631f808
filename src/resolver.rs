use crate::config::GitConfig;
use crate::domain::{BranchContext, Version, VersionBump};
use crate::error::Result;
use crate::git::{commands, GitRunner};
use crate::ui;
use std::path::Path;

/// Everything the release needs to know about the module's versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Topic branch the release belongs to
    pub topic: String,
    /// Latest tag's version text, without the `v` prefix
    pub current_tag: String,
    pub current: Version,
    pub next: Version,
}

/// Works out the topic and next version of a module repo.
pub struct VersionResolver<'a> {
    runner: &'a dyn GitRunner,
    git: &'a GitConfig,
}

impl<'a> VersionResolver<'a> {
    pub fn new(runner: &'a dyn GitRunner, git: &'a GitConfig) -> Self {
        VersionResolver { runner, git }
    }

    /// Sync the module repo, validate the topic, and bump the latest tag.
    ///
    /// Only the fetch touches the repository, and it is safe to repeat.
    ///
    /// # Returns
    /// * `Ok(Resolution)` - Topic plus current and next versions
    /// * `Err(TopicMismatch)` - Branch and topic disagree
    /// * `Err(Version)` - Latest tag is not `vX.Y.Z`
    /// * `Err(Command)` - A git command failed
    pub fn resolve(
        &self,
        module_dir: &Path,
        bump: VersionBump,
        provided_topic: Option<&str>,
    ) -> Result<Resolution> {
        ui::display_status("updating module repo...");
        self.runner
            .run(&commands::update(&self.git.remote), module_dir)?;

        let branch_name = self
            .runner
            .run_text(&commands::current_branch(), module_dir)?;
        let branch = BranchContext::new(branch_name, &self.git.main_branch);
        let topic = branch.resolve_topic(provided_topic)?;
        log::debug!("module branch '{}', topic '{}'", branch.name, topic);

        let latest = self.runner.run_text(
            &commands::latest_tag(&self.git.remote, &self.git.main_branch),
            module_dir,
        )?;
        let (current_tag, current) = Version::parse_tag(&latest)?;
        let next = current.bump(bump)?;

        Ok(Resolution {
            topic,
            current_tag,
            current,
            next,
        })
    }
}
