//! Aggregation of judge rankings into a single consensus ordering.
//!
//! Pure domain logic: takes the parsed orderings from stage 2 plus the
//! run's label assignment and produces per-model average ranks. The
//! aggregate is recomputed from scratch each run, never updated
//! incrementally.

use crate::council::label::LabelMap;
use crate::council::value_objects::{AggregateEntry, JudgeRanking};

/// Combine all judges' parsed orderings into one consensus ranking.
///
/// Each label gets its 1-indexed position within every ranking that
/// mentions it; positions are averaged per label. Rules:
///
/// - labels no judge mentioned are absent from the output (no imputed
///   worst-case rank)
/// - labels outside `label_to_model` (parser artifacts) are discarded
/// - output is sorted ascending by `average_rank`; ties keep label
///   assignment order (stable sort over label-ordered accumulation)
/// - no judges, or all judges parsed empty, yields an empty output
pub fn calculate_aggregate_rankings(
    judge_rankings: &[JudgeRanking],
    label_to_model: &LabelMap,
) -> Vec<AggregateEntry> {
    // (sum of positions, count) per assigned label, in label order
    let mut tallies = vec![(0usize, 0usize); label_to_model.len()];

    for ranking in judge_rankings {
        for (position, label) in ranking.parsed_order.iter().enumerate() {
            if let Some(index) = label_to_model.index_of(label) {
                tallies[index].0 += position + 1;
                tallies[index].1 += 1;
            }
        }
    }

    let mut entries: Vec<AggregateEntry> = label_to_model
        .iter()
        .zip(tallies)
        .filter(|(_, (_, count))| *count > 0)
        .map(|((_, model), (sum, count))| AggregateEntry {
            model: model.to_string(),
            average_rank: sum as f64 / count as f64,
            rankings_count: count,
        })
        .collect();

    entries.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(judge: &str, raw: &str) -> JudgeRanking {
        JudgeRanking::new(judge, raw, None)
    }

    fn map(models: &[&str]) -> LabelMap {
        LabelMap::assign(models)
    }

    #[test]
    fn test_basic_aggregation() {
        let rankings = vec![
            ranking("gpt", "FINAL RANKING:\n1. Response A\n2. Response B\n3. Response C"),
            ranking("claude", "FINAL RANKING:\n1. Response B\n2. Response A\n3. Response C"),
        ];
        let labels = map(&["openai/gpt-4", "anthropic/claude", "google/gemini"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        // A: 1,2 -> 1.5; B: 2,1 -> 1.5; C: 3,3 -> 3.0
        assert_eq!(result.len(), 3);
        let by_model: std::collections::HashMap<_, _> = result
            .iter()
            .map(|e| (e.model.as_str(), e.average_rank))
            .collect();
        assert_eq!(by_model["openai/gpt-4"], 1.5);
        assert_eq!(by_model["anthropic/claude"], 1.5);
        assert_eq!(by_model["google/gemini"], 3.0);
        assert_eq!(result[2].model, "google/gemini");
    }

    #[test]
    fn test_sorted_ascending_by_average_rank() {
        let rankings = vec![
            ranking("gpt", "FINAL RANKING:\n1. Response C\n2. Response A\n3. Response B"),
            ranking("claude", "FINAL RANKING:\n1. Response C\n2. Response B\n3. Response A"),
        ];
        let labels = map(&["model-a", "model-b", "model-c"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        assert_eq!(result[0].model, "model-c");
        assert_eq!(result[0].average_rank, 1.0);
    }

    #[test]
    fn test_ties_keep_label_order() {
        let rankings = vec![
            ranking("j1", "FINAL RANKING:\n1. Response A\n2. Response B"),
            ranking("j2", "FINAL RANKING:\n1. Response B\n2. Response A"),
        ];
        let labels = map(&["model-a", "model-b"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        // Both at 1.5; stable sort keeps A before B.
        assert_eq!(result[0].model, "model-a");
        assert_eq!(result[1].model, "model-b");
    }

    #[test]
    fn test_empty_rankings() {
        let labels = map(&["model-a"]);
        assert!(calculate_aggregate_rankings(&[], &labels).is_empty());
    }

    #[test]
    fn test_all_judges_parsed_empty() {
        let rankings = vec![ranking("j1", "no ranking here"), ranking("j2", "")];
        let labels = map(&["model-a", "model-b"]);
        assert!(calculate_aggregate_rankings(&rankings, &labels).is_empty());
    }

    #[test]
    fn test_unassigned_label_discarded() {
        let rankings = vec![ranking("gpt", "FINAL RANKING:\n1. Response A\n2. Response Z")];
        let labels = map(&["model-a"]); // Response Z not assigned

        let result = calculate_aggregate_rankings(&rankings, &labels);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].model, "model-a");
    }

    #[test]
    fn test_rankings_count_tracked() {
        let rankings = vec![
            ranking("m1", "FINAL RANKING:\n1. Response A\n2. Response B"),
            ranking("m2", "FINAL RANKING:\n1. Response A\n2. Response B"),
            ranking("m3", "FINAL RANKING:\n1. Response B\n2. Response A"),
        ];
        let labels = map(&["model-a", "model-b"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        for entry in &result {
            assert_eq!(entry.rankings_count, 3);
        }
    }

    #[test]
    fn test_single_judge() {
        let rankings = vec![ranking("solo", "FINAL RANKING:\n1. Response B\n2. Response A")];
        let labels = map(&["model-a", "model-b"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].model, "model-b");
        assert_eq!(result[0].average_rank, 1.0);
        assert_eq!(result[1].model, "model-a");
        assert_eq!(result[1].average_rank, 2.0);
    }

    #[test]
    fn test_partially_mentioned_label() {
        // Only one judge mentions C; it still appears, averaged over
        // the judges that ranked it.
        let rankings = vec![
            ranking("j1", "FINAL RANKING:\n1. Response A\n2. Response B\n3. Response C"),
            ranking("j2", "FINAL RANKING:\n1. Response A\n2. Response B"),
        ];
        let labels = map(&["model-a", "model-b", "model-c"]);

        let result = calculate_aggregate_rankings(&rankings, &labels);

        let c = result.iter().find(|e| e.model == "model-c").unwrap();
        assert_eq!(c.rankings_count, 1);
        assert_eq!(c.average_rank, 3.0);
    }
}
