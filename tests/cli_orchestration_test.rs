use pushit::cli::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
use pushit::config::Config;
use pushit::domain::VersionBump;
use pushit::git::{commands, GitRunner, MockGit};
use pushit::PushitError;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MAKEFILE: &str = "core = 7.x\napi = 2\n\nprojects[foo][type] = \"module\"\nprojects[foo][download][type] = \"git\"\nprojects[foo][download][tag] = \"v1.2.3\"\n";

struct Workspace {
    _root: TempDir,
    module_dir: PathBuf,
    site_dir: PathBuf,
}

impl Workspace {
    fn new(with_marker: bool) -> Self {
        let root = TempDir::new().unwrap();
        let module_dir = root.path().join("foo");
        let site_dir = root.path().join("site");
        fs::create_dir(&module_dir).unwrap();
        fs::create_dir(&site_dir).unwrap();
        if with_marker {
            fs::write(module_dir.join("foo.module"), "<?php\n").unwrap();
        }
        fs::write(site_dir.join("barcelona.make"), MAKEFILE).unwrap();

        Workspace {
            _root: root,
            module_dir,
            site_dir,
        }
    }

    fn args(&self, bump: VersionBump, topic: Option<&str>) -> PublishWorkflowArgs {
        PublishWorkflowArgs {
            bump,
            module_dir: self.module_dir.clone(),
            site_repo: self.site_dir.clone(),
            site_makefile: "barcelona.make".to_string(),
            topic: topic.map(str::to_string),
            no_module: false,
        }
    }

    fn makefile(&self) -> String {
        fs::read_to_string(self.site_dir.join("barcelona.make")).unwrap()
    }
}

fn module_repo(branch: &str) -> MockGit {
    MockGit::new()
        .with_response(&commands::current_branch(), format!("{}\n", branch))
        .with_response(&commands::latest_tag("origin", "master"), "v1.2.3\n")
}

fn run(ws_args: &PublishWorkflowArgs, git: &MockGit, answer: &str) -> pushit::Result<WorkflowResult> {
    let config = Config::default();
    let mut input = Cursor::new(answer.as_bytes().to_vec());
    let mut output = Vec::new();
    run_publish_workflow(ws_args, &config, git, &mut input, &mut output)
}

fn mutating_calls(git: &MockGit) -> Vec<Vec<String>> {
    git.calls()
        .into_iter()
        .map(|call| call.args)
        .filter(|args| {
            matches!(
                args[0].as_str(),
                "tag" | "push" | "commit" | "branch" | "checkout" | "merge"
            )
        })
        .collect()
}

#[test]
fn test_minor_release_from_topic_branch() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    let result = run(&ws.args(VersionBump::Minor, None), &git, "y\n").unwrap();

    let summary = match result {
        WorkflowResult::Published(summary) => summary,
        WorkflowResult::Aborted => panic!("release should not abort"),
    };
    assert_eq!(summary.module, "foo");
    assert_eq!(summary.topic, "NCAA-5");
    assert_eq!(summary.tag, "v1.3.0");
    assert_eq!(summary.commit_message, "NCAA-5 foo -> 1.3.0");
    assert_eq!(summary.deleted_topic.as_deref(), Some("NCAA-5"));

    let makefile = ws.makefile();
    assert!(makefile.contains("projects[foo][download][tag] = \"v1.3.0\""));
    assert!(!makefile.contains("v1.2.3"));
    assert!(makefile.starts_with("core = 7.x\napi = 2\n\n"));
    assert!(makefile.ends_with('\n'));

    assert!(git.was_run_in(&commands::tag("v1.3.0"), &ws.module_dir));
    assert!(git.was_run_in(&commands::push_tags("origin"), &ws.module_dir));
    assert!(git.was_run_in(&commands::delete_branch("NCAA-5"), &ws.module_dir));
    assert!(git.was_run_in(
        &commands::commit("barcelona.make", "NCAA-5 foo -> 1.3.0"),
        &ws.site_dir
    ));
    assert!(git.was_run_in(&commands::push_branch("origin", "master"), &ws.site_dir));
}

#[test]
fn test_site_push_follows_tag_push() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap();

    let tags_pushed = git.position(&commands::push_tags("origin")).unwrap();
    let site_pushed = git
        .position(&commands::push_branch("origin", "master"))
        .unwrap();
    assert!(tags_pushed < site_pushed);

    let tagged = git.position(&commands::tag("v1.2.4")).unwrap();
    assert!(tagged < tags_pushed);
}

#[test]
fn test_release_on_main_with_topic() {
    let ws = Workspace::new(true);
    let git = module_repo("master");

    let result = run(&ws.args(VersionBump::Major, Some("NCAA-9")), &git, "y\n").unwrap();

    match result {
        WorkflowResult::Published(summary) => {
            assert_eq!(summary.tag, "v2.0.0");
            assert_eq!(summary.commit_message, "NCAA-9 foo -> 2.0.0");
            assert_eq!(summary.deleted_topic.as_deref(), Some("NCAA-9"));
        }
        WorkflowResult::Aborted => panic!("release should not abort"),
    }
    // The merged topic branch is cleaned up even when releasing from main
    assert!(git.was_run_in(&commands::delete_branch("NCAA-9"), &ws.module_dir));
}

#[test]
fn test_abort_changes_nothing() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    let result = run(&ws.args(VersionBump::Patch, None), &git, "n\n").unwrap();

    assert_eq!(result, WorkflowResult::Aborted);
    assert!(mutating_calls(&git).is_empty());
    assert_eq!(ws.makefile(), MAKEFILE);
}

#[test]
fn test_only_lowercase_y_confirms() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    let result = run(&ws.args(VersionBump::Patch, None), &git, "Y\n").unwrap();

    assert_eq!(result, WorkflowResult::Aborted);
    assert!(git.position(&commands::tag("v1.2.4")).is_none());
}

#[test]
fn test_topic_mismatch_stops_before_release() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    let err = run(&ws.args(VersionBump::Patch, Some("NCAA-6")), &git, "y\n").unwrap_err();

    assert!(matches!(err, PushitError::TopicMismatch(_)));
    assert!(!err.is_fatal());
    assert!(mutating_calls(&git).is_empty());
}

#[test]
fn test_main_without_topic_is_rejected() {
    let ws = Workspace::new(true);
    let git = module_repo("master");

    let err = run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap_err();
    assert!(err.to_string().contains("--topic"));
}

#[test]
fn test_missing_manifest_entry_creates_no_tag() {
    let ws = Workspace::new(true);
    fs::write(
        ws.site_dir.join("barcelona.make"),
        "projects[foo][download][tag] = \"v1.1.0\"\n",
    )
    .unwrap();
    let git = module_repo("NCAA-5");

    let err = run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap_err();

    assert!(matches!(err, PushitError::ManifestEntryNotFound { .. }));
    assert!(git.position(&commands::tag("v1.2.4")).is_none());
    assert!(git.position(&commands::push_tags("origin")).is_none());
}

#[test]
fn test_missing_module_marker() {
    let ws = Workspace::new(false);
    let git = module_repo("NCAA-5");

    let err = run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap_err();

    assert!(matches!(err, PushitError::ModuleNotFound { ref module, .. } if module == "foo"));
    assert!(git.calls().is_empty());
}

#[test]
fn test_no_module_skips_marker_check() {
    let ws = Workspace::new(false);
    let git = module_repo("NCAA-5");
    let mut args = ws.args(VersionBump::Patch, None);
    args.no_module = true;

    let result = run(&args, &git, "y\n").unwrap();
    assert!(matches!(result, WorkflowResult::Published(_)));
}

#[test]
fn test_missing_makefile() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");
    let mut args = ws.args(VersionBump::Patch, None);
    args.site_makefile = "staging.make".to_string();

    let err = run(&args, &git, "y\n").unwrap_err();
    assert!(matches!(err, PushitError::MakefileNotFound { .. }));
}

#[test]
fn test_failed_tag_push_leaves_site_unpushed() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5").with_failure(&commands::push_tags("origin"));

    let err = run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.command_output(), Some("fatal: mocked failure"));
    assert!(git
        .position(&commands::push_branch("origin", "master"))
        .is_none());
}

#[test]
fn test_bad_latest_tag() {
    let ws = Workspace::new(true);
    let git = MockGit::new()
        .with_response(&commands::current_branch(), "NCAA-5\n")
        .with_response(&commands::latest_tag("origin", "master"), "release-7\n");

    let err = run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap_err();
    assert!(matches!(err, PushitError::Version(_)));
}

#[test]
fn test_module_commands_run_in_module_dir() {
    let ws = Workspace::new(true);
    let git = module_repo("NCAA-5");

    run(&ws.args(VersionBump::Patch, None), &git, "y\n").unwrap();

    assert!(git.was_run_in(&commands::update("origin"), Path::new(&ws.module_dir)));
    assert!(git.was_run_in(&commands::update("origin"), Path::new(&ws.site_dir)));
    assert!(!git.was_run_in(&commands::tag("v1.2.4"), &ws.site_dir));
}

/// Site runner whose fast-forward brings in another commit touching the
/// makefile.
struct UpstreamSite<'a> {
    inner: &'a MockGit,
    site_dir: PathBuf,
    upstream: &'static str,
}

impl GitRunner for UpstreamSite<'_> {
    fn run(&self, args: &[String], dir: &Path) -> pushit::Result<Vec<u8>> {
        if args.first().map(String::as_str) == Some("merge") && dir == self.site_dir.as_path() {
            fs::write(self.site_dir.join("barcelona.make"), self.upstream)?;
        }
        self.inner.run(args, dir)
    }
}

#[test]
fn test_release_keeps_upstream_makefile_changes() {
    let ws = Workspace::new(true);
    fs::write(
        ws.site_dir.join("barcelona.make"),
        "projects[foo][download][tag] = \"v1.2.3\"\nprojects[bar][download][tag] = \"v0.1.0\"\n",
    )
    .unwrap();
    let mock = module_repo("NCAA-5");
    let git = UpstreamSite {
        inner: &mock,
        site_dir: ws.site_dir.clone(),
        upstream: "projects[foo][download][tag] = \"v1.2.3\"\nprojects[bar][download][tag] = \"v0.2.0\"\n",
    };

    let config = Config::default();
    let mut input = Cursor::new(b"y\n".to_vec());
    let mut output = Vec::new();
    let result = run_publish_workflow(
        &ws.args(VersionBump::Minor, None),
        &config,
        &git,
        &mut input,
        &mut output,
    )
    .unwrap();

    assert!(matches!(result, WorkflowResult::Published(_)));
    assert_eq!(
        ws.makefile(),
        "projects[foo][download][tag] = \"v1.3.0\"\nprojects[bar][download][tag] = \"v0.2.0\"\n"
    );
    assert!(mock.was_run_in(&commands::push_branch("origin", "master"), &ws.site_dir));
}

#[test]
fn test_crlf_makefile_keeps_line_endings() {
    let ws = Workspace::new(true);
    let crlf = MAKEFILE.replace('\n', "\r\n");
    fs::write(ws.site_dir.join("barcelona.make"), &crlf).unwrap();
    let git = module_repo("NCAA-5");

    run(&ws.args(VersionBump::Minor, None), &git, "y\n").unwrap();

    assert_eq!(ws.makefile(), crlf.replace("\"v1.2.3\"", "\"v1.3.0\""));
}
