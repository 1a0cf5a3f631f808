//! Command-line workflow: everything between parsed arguments and git.

pub mod orchestration;

pub use orchestration::{
    run_publish_workflow, Orchestrator, PublishWorkflowArgs, ReleaseSummary, RunState,
    WorkflowResult,
};
