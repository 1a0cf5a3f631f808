use crate::config::GitConfig;
use crate::error::{PushitError, Result};
use crate::git::{commands, GitRunner};
use crate::manifest::{Manifest, PinUpdate};
use crate::publish::ReleaseOutcome;
use crate::ui;
use std::path::Path;
use std::sync::mpsc::Receiver;

/// Writes and commits the site makefile, then pushes once the module
/// release has finished.
pub struct SitePublishTask<'a> {
    pub runner: &'a dyn GitRunner,
    pub git: &'a GitConfig,
    pub site_dir: &'a Path,
    pub makefile: &'a str,
}

impl<'a> SitePublishTask<'a> {
    /// Update the site repo, rewrite the module's pin in the makefile, commit
    /// it, wait for the module release, and push.
    ///
    /// The makefile is read after the fast-forward, so upstream changes to
    /// other lines are kept in the commit.
    ///
    /// # Arguments
    /// * `update` - The pin to move
    /// * `message` - Commit message
    /// * `release` - One-shot receiver for the module release outcome
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - The module's outcome, after the site push
    /// * `Err` - Any failure here, or the module task's failure; the site
    ///   branch is never pushed in either case
    pub fn run(
        &self,
        update: &PinUpdate,
        message: &str,
        release: &Receiver<Result<ReleaseOutcome>>,
    ) -> Result<ReleaseOutcome> {
        let remote = self.git.remote.as_str();
        let main = self.git.main_branch.as_str();

        self.runner.run(&commands::update(remote), self.site_dir)?;
        self.runner.run(&commands::checkout(main), self.site_dir)?;
        self.runner
            .run(&commands::fast_forward(remote, main), self.site_dir)?;

        let path = self.site_dir.join(self.makefile);
        let rewrite = update.apply(&Manifest::load(&path)?)?;
        rewrite.manifest.write(&path)?;
        log::debug!("rewrote line {} of {}", rewrite.line + 1, path.display());

        self.runner
            .run(&commands::commit(self.makefile, message), self.site_dir)?;
        ui::display_commit_message(message);
        ui::display_success("committed changes with message");

        log::debug!("site commit done, waiting for module release");
        let outcome = match release.recv() {
            Ok(outcome) => outcome?,
            Err(_) => return Err(PushitError::ReleaseAbandoned),
        };

        self.runner
            .run(&commands::push_branch(remote, main), self.site_dir)?;
        log::debug!("pushed {} in {}", main, self.site_dir.display());

        Ok(outcome)
    }
}
