//! Progress reporting for council execution

use colored::Colorize;
use council_application::ProgressNotifier;
use council_domain::{Model, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during council execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: &Stage) -> &'static str {
        match stage {
            Stage::Responses => "Stage 1: Member Answers",
            Stage::Rankings => "Stage 2: Peer Rankings",
            Stage::Synthesis => "Stage 3: Synthesis",
        }
    }

    fn stage_short_name(stage: &Stage) -> &'static str {
        match stage {
            Stage::Responses => "Stage 1",
            Stage::Rankings => "Stage 2",
            Stage::Synthesis => "Stage 3",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        let stage_name = Self::stage_display_name(stage);

        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage_name.to_string());
        pb.set_message("Starting...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_task_complete(&self, _stage: &Stage, model: &Model, success: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: &Stage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            let stage_name = Self::stage_short_name(stage);
            pb.finish_with_message(format!("{} complete!", stage_name.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        let stage_name = ProgressReporter::stage_display_name(stage);
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            stage_name.bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: &Stage, model: &Model, success: bool) {
        if success {
            println!("  {} {}", "v".green(), model);
        } else {
            println!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_stage_complete(&self, _stage: &Stage) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_names() {
        assert_eq!(
            ProgressReporter::stage_display_name(&Stage::Responses),
            "Stage 1: Member Answers"
        );
        assert_eq!(
            ProgressReporter::stage_display_name(&Stage::Rankings),
            "Stage 2: Peer Rankings"
        );
        assert_eq!(
            ProgressReporter::stage_display_name(&Stage::Synthesis),
            "Stage 3: Synthesis"
        );
    }

    #[test]
    fn test_notifiers_survive_a_full_stage_cycle() {
        // Both implementations are used behind the port trait object.
        let model: Model = "openai/gpt-5.1".parse().unwrap();
        for notifier in [
            &ProgressReporter::new() as &dyn ProgressNotifier,
            &SimpleProgress,
        ] {
            notifier.on_stage_start(&Stage::Responses, 2);
            notifier.on_task_complete(&Stage::Responses, &model, true);
            notifier.on_task_complete(&Stage::Responses, &model, false);
            notifier.on_stage_complete(&Stage::Responses);
        }
    }

    #[test]
    fn test_stage_complete_without_start_is_harmless() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_complete(&Stage::Synthesis);
        reporter.on_task_complete(&Stage::Synthesis, &"m".parse().unwrap(), true);
    }
}
