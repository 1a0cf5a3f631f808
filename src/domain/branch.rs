use crate::error::{PushitError, Result};

/// Represents the module repo's checked-out branch with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_main: bool,
}

impl BranchContext {
    /// Create a new branch context, comparing against the configured main branch
    pub fn new(name: impl Into<String>, main_branch: &str) -> Self {
        let name_str = name.into().trim().to_string();
        let is_main = name_str == main_branch;

        BranchContext {
            name: name_str,
            is_main,
        }
    }

    /// Resolve the topic branch this release belongs to.
    ///
    /// On the main branch the topic must be given explicitly (the topic branch
    /// has already been merged). On a topic branch, a given topic must match
    /// it; when omitted, the current branch is the topic. An empty topic
    /// counts as omitted.
    pub fn resolve_topic(&self, provided: Option<&str>) -> Result<String> {
        let provided = provided.map(str::trim).filter(|t| !t.is_empty());

        match provided {
            None if self.is_main => Err(PushitError::topic(
                "If you have already merged your branch, you must provide it via the --topic option. Otherwise, checkout the branch and re-run this utility.",
            )),
            None => Ok(self.name.clone()),
            Some(topic) if topic != self.name && !self.is_main => {
                Err(PushitError::topic(format!(
                    "The branch supplied via --topic does not match the current module branch ({} != {})",
                    topic, self.name
                )))
            }
            Some(topic) => Ok(topic.to_string()),
        }
    }
}
