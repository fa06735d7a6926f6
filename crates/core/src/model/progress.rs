use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::quiz_result::QuizResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicScore {
    pub topic: String,
    pub average_percent: u32,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u32,
    pub average_percent: u32,
}

impl MonthlyAverage {
    /// Short month name, e.g. "Jan".
    #[must_use]
    pub fn label(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        usize::try_from(self.month)
            .ok()
            .and_then(|month| month.checked_sub(1))
            .and_then(|index| NAMES.get(index))
            .copied()
            .unwrap_or("?")
    }
}

/// Aggregates shown on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressReport {
    /// Sorted by topic, case-insensitively grouped.
    pub by_topic: Vec<TopicScore>,
    /// Oldest month first.
    pub by_month: Vec<MonthlyAverage>,
}

impl ProgressReport {
    #[must_use]
    pub fn from_results(results: &[QuizResult]) -> Self {
        let mut topics: BTreeMap<String, (String, u32, u32)> = BTreeMap::new();
        let mut months: BTreeMap<(i32, u32), (u32, u32)> = BTreeMap::new();

        for result in results {
            let percent = result.percent();

            let key = result.topic().to_lowercase();
            let entry = topics
                .entry(key)
                .or_insert_with(|| (result.topic().to_string(), 0, 0));
            entry.1 += percent;
            entry.2 += 1;

            let completed = result.completed_at();
            let month = months
                .entry((completed.year(), completed.month()))
                .or_insert((0, 0));
            month.0 += percent;
            month.1 += 1;
        }

        let by_topic = topics
            .into_values()
            .map(|(topic, sum, attempts)| TopicScore {
                topic,
                average_percent: sum / attempts,
                attempts,
            })
            .collect();
        let by_month = months
            .into_iter()
            .map(|((year, month), (sum, count))| MonthlyAverage {
                year,
                month,
                average_percent: sum / count,
            })
            .collect();

        Self { by_topic, by_month }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewQuizResult, QuizResultId, UserId};
    use crate::time::fixed_now;
    use chrono::Duration;

    fn result(id: i64, topic: &str, score: u32, total: u32, days_ago: i64) -> QuizResult {
        NewQuizResult::new(
            UserId::new("u").unwrap(),
            topic,
            score,
            total,
            fixed_now() - Duration::days(days_ago),
        )
        .unwrap()
        .with_id(QuizResultId::new(id))
    }

    #[test]
    fn groups_topics_case_insensitively() {
        let report = ProgressReport::from_results(&[
            result(1, "History", 4, 5, 0),
            result(2, "history", 2, 5, 0),
            result(3, "Math", 3, 3, 0),
        ]);
        assert_eq!(report.by_topic.len(), 2);
        assert_eq!(report.by_topic[0].topic, "History");
        assert_eq!(report.by_topic[0].average_percent, 60);
        assert_eq!(report.by_topic[0].attempts, 2);
        assert_eq!(report.by_topic[1].average_percent, 100);
    }

    #[test]
    fn months_are_chronological() {
        // fixed_now() is 2024-03-09.
        let report = ProgressReport::from_results(&[
            result(1, "Math", 1, 2, 0),
            result(2, "Math", 2, 2, 40),
        ]);
        let labels: Vec<_> = report.by_month.iter().map(MonthlyAverage::label).collect();
        assert_eq!(labels, vec!["Jan", "Mar"]);
        assert_eq!(report.by_month[0].average_percent, 100);
        assert_eq!(report.by_month[1].average_percent, 50);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        assert!(ProgressReport::from_results(&[]).is_empty());
    }
}
