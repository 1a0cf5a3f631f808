//! Argument lists for the git commands a release needs.

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Bring remote-tracking branches and tags up to date.
pub fn update(remote: &str) -> Vec<String> {
    args(&["fetch", remote, "--tags", "--prune"])
}

pub fn current_branch() -> Vec<String> {
    args(&["rev-parse", "--abbrev-ref", "HEAD"])
}

/// Most recent tag reachable from the remote main branch.
pub fn latest_tag(remote: &str, main_branch: &str) -> Vec<String> {
    let tracking = format!("{}/{}", remote, main_branch);
    args(&["describe", &tracking, "--abbrev=0", "--tags"])
}

pub fn checkout(branch: &str) -> Vec<String> {
    args(&["checkout", branch])
}

/// Fast-forward the checked-out branch to its remote counterpart.
pub fn fast_forward(remote: &str, main_branch: &str) -> Vec<String> {
    let tracking = format!("{}/{}", remote, main_branch);
    args(&["merge", "--ff-only", &tracking])
}

pub fn delete_branch(branch: &str) -> Vec<String> {
    args(&["branch", "-d", branch])
}

pub fn tag(name: &str) -> Vec<String> {
    args(&["tag", name])
}

pub fn push_tags(remote: &str) -> Vec<String> {
    args(&["push", remote, "--tags"])
}

/// Commit a single file with the given message.
pub fn commit(file: &str, message: &str) -> Vec<String> {
    args(&["commit", file, "-m", message])
}

pub fn push_branch(remote: &str, branch: &str) -> Vec<String> {
    args(&["push", remote, branch])
}
