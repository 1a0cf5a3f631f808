use crate::boundary::BoundaryWarning;
use crate::config::GitConfig;
use crate::domain::Version;
use crate::error::Result;
use crate::git::{commands, GitRunner};
use crate::publish::ReleaseOutcome;
use crate::ui;
use std::path::Path;

/// Tags the module repo's main branch and pushes the tag.
pub struct ModuleReleaseTask<'a> {
    pub runner: &'a dyn GitRunner,
    pub git: &'a GitConfig,
    pub module_dir: &'a Path,
    pub topic: &'a str,
    pub version: Version,
}

impl<'a> ModuleReleaseTask<'a> {
    /// Move to main (deleting the merged topic branch), tag, and push tags.
    ///
    /// The topic branch is deleted with `git branch -d` without checking it
    /// against the remote first; git's own merge check is the only guard.
    pub fn run(&self) -> Result<ReleaseOutcome> {
        let remote = self.git.remote.as_str();
        let main = self.git.main_branch.as_str();
        let mut deleted_topic = None;

        if self.topic != main {
            self.runner.run(&commands::checkout(main), self.module_dir)?;
            self.runner
                .run(&commands::fast_forward(remote, main), self.module_dir)?;

            ui::display_boundary_warning(&BoundaryWarning::UnguardedTopicDelete {
                topic: self.topic.to_string(),
            });
            self.runner
                .run(&commands::delete_branch(self.topic), self.module_dir)?;
            ui::display_success(&format!(
                "Module Repo Cleanup: Local topic branch '{}' was deleted.",
                self.topic
            ));
            deleted_topic = Some(self.topic.to_string());
        } else {
            self.runner
                .run(&commands::fast_forward(remote, main), self.module_dir)?;
        }

        let tag = self.version.tag();
        self.runner.run(&commands::tag(&tag), self.module_dir)?;
        self.runner.run(&commands::push_tags(remote), self.module_dir)?;
        log::debug!("pushed {} from {}", tag, self.module_dir.display());
        ui::display_success(&format!("Tagged and pushed {}", tag));

        Ok(ReleaseOutcome { tag, deleted_topic })
    }
}
