//! The two-repository release.
//!
//! After confirmation, [ModuleReleaseTask] runs on a background thread while
//! [SitePublishTask] runs in the foreground. The module task sends its single
//! outcome on a one-shot channel; the site task blocks on that channel right
//! before its push, so the site branch is only ever pushed after the module
//! tag push has completed successfully.
//!
//! Nothing is rolled back. A failure after confirmation can leave the module
//! tagged without the site updated, or a site commit unpushed.

pub mod module_release;
pub mod site_publish;

pub use module_release::ModuleReleaseTask;
pub use site_publish::SitePublishTask;

use crate::boundary::BoundaryWarning;
use crate::error::Result;
use crate::manifest::PinUpdate;
use crate::ui;
use std::sync::mpsc;
use std::thread;

/// What the module release task did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Tag created and pushed, e.g. `v1.3.0`
    pub tag: String,
    /// Local topic branch that was deleted, if any
    pub deleted_topic: Option<String>,
}

/// Run both tasks and join them.
///
/// The module task is started first; the site task follows on the calling
/// thread. Both have finished when this returns.
pub fn release(
    module: ModuleReleaseTask<'_>,
    site: SitePublishTask<'_>,
    update: &PinUpdate,
    message: &str,
) -> Result<ReleaseOutcome> {
    let tag = module.version.tag();
    let site_dir = site.site_dir.display().to_string();

    let result = thread::scope(|scope| {
        let (tx, rx) = mpsc::sync_channel::<Result<ReleaseOutcome>>(1);

        let handle = scope.spawn(move || {
            let outcome = module.run();
            if tx.send(outcome).is_err() {
                log::debug!("site task stopped before the module release finished");
            }
        });

        let result = site.run(update, message, &rx);

        if handle.join().is_err() {
            log::error!("module release task panicked");
        }
        result
    });

    if result.is_err() {
        ui::display_boundary_warning(&BoundaryWarning::PartialRelease { tag, site_repo: site_dir });
    }
    result
}
