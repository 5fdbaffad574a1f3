//! Console output formatter for council results

use colored::Colorize;
use council_domain::CouncilBundle;

/// Formats council bundles for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete bundle, stage by stage
    pub fn format(bundle: &CouncilBundle) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        if let Some(title) = &bundle.title {
            output.push_str(&format!("{} {}\n\n", "Title:".cyan().bold(), title));
        }

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            bundle.question
        ));

        output.push_str(&format!(
            "{} {}\n\n",
            "Members:".cyan().bold(),
            bundle.members.join(", ")
        ));

        output.push_str(&Self::section_header("Stage 1: Member Answers"));
        for answer in &bundle.stage1 {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("-- {} --", answer.model).yellow().bold(),
                answer.content
            ));
        }

        if !bundle.stage2.is_empty() {
            output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
            for ranking in &bundle.stage2 {
                let order = if ranking.has_ranking() {
                    ranking
                        .parsed_order
                        .iter()
                        .map(|l| l.as_str().to_string())
                        .collect::<Vec<_>>()
                        .join(" > ")
                } else {
                    "(no ranking found)".to_string()
                };
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("-- {} ranked --", ranking.judge).yellow().bold(),
                    order
                ));
            }
        }

        if !bundle.aggregate.is_empty() {
            output.push_str(&format!("\n{}\n", "Consensus Ranking:".cyan().bold()));
            for (position, entry) in bundle.aggregate.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} (avg rank {:.2}, {} rankings)\n",
                    position + 1,
                    entry.model,
                    entry.average_rank,
                    entry.rankings_count
                ));
            }
        }

        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Lead: {}", bundle.stage3.model).yellow().bold(),
            bundle.stage3.content
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(bundle: &CouncilBundle) -> String {
        serde_json::to_string_pretty(bundle).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(bundle: &CouncilBundle) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), bundle.question));

        output.push_str(&format!(
            "{} {}\n\n",
            "Members consulted:".dimmed(),
            bundle.members.join(", ")
        ));

        if let Some(winner) = bundle.top_ranked() {
            output.push_str(&format!(
                "{} {} (avg rank {:.2})\n\n",
                "Top ranked:".dimmed(),
                winner.model,
                winner.average_rank
            ));
        }

        output.push_str(&bundle.stage3.content);
        output.push('\n');

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AggregateEntry, JudgeRanking, LabelMap, MemberAnswer, SynthesisResult,
    };

    fn sample_bundle() -> CouncilBundle {
        CouncilBundle {
            question: "What is 2+2?".to_string(),
            members: vec!["model/a".to_string(), "model/b".to_string()],
            stage1: vec![
                MemberAnswer::new("model/a", "Four.", None),
                MemberAnswer::new("model/b", "It is 4.", None),
            ],
            stage2: vec![JudgeRanking::new(
                "model/a",
                "FINAL RANKING:\n1. Response B\n2. Response A",
                None,
            )],
            stage3: SynthesisResult::new("model/b", "The answer is 4.", None),
            aggregate: vec![
                AggregateEntry {
                    model: "model/b".to_string(),
                    average_rank: 1.0,
                    rankings_count: 1,
                },
                AggregateEntry {
                    model: "model/a".to_string(),
                    average_rank: 2.0,
                    rankings_count: 1,
                },
            ],
            label_to_model: LabelMap::assign(&["model/a", "model/b"]),
            title: Some("Basic arithmetic".to_string()),
            usage_ids: vec![],
        }
    }

    #[test]
    fn test_full_format_includes_all_stages() {
        let text = ConsoleFormatter::format(&sample_bundle());
        assert!(text.contains("Stage 1: Member Answers"));
        assert!(text.contains("Stage 2: Peer Rankings"));
        assert!(text.contains("Stage 3: Final Synthesis"));
        assert!(text.contains("Basic arithmetic"));
        assert!(text.contains("Response B > Response A"));
    }

    #[test]
    fn test_synthesis_only_is_concise() {
        let text = ConsoleFormatter::format_synthesis_only(&sample_bundle());
        assert!(text.contains("The answer is 4."));
        assert!(text.contains("model/b (avg rank 1.00)"));
        assert!(!text.contains("Stage 1"));
    }

    #[test]
    fn test_json_is_valid() {
        let text = ConsoleFormatter::format_json(&sample_bundle());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["question"], "What is 2+2?");
        assert_eq!(value["label_to_model"]["Response A"], "model/a");
    }
}
