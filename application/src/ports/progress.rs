//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.

use council_domain::{Model, Stage};

/// Callback for progress updates during council execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console bars, API events, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize);

    /// Called when a member call resolves within a stage
    fn on_task_complete(&self, stage: &Stage, model: &Model, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: &Stage, _model: &Model, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
