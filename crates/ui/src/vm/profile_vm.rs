use buddy_core::i18n::Translator;
use buddy_core::model::{ProgressReport, QuizResult, UserProfile};

use crate::vm::time_fmt::format_month_year;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileHeaderVm {
    pub display_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub initials: String,
    pub member_since: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarVm {
    pub label: String,
    /// 0..=100, also used as the bar width.
    pub percent: u32,
    pub detail: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressVm {
    pub by_topic: Vec<BarVm>,
    pub by_month: Vec<BarVm>,
}

impl ProgressVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty() && self.by_month.is_empty()
    }
}

#[must_use]
pub fn map_profile_header(profile: &UserProfile, t: &Translator) -> ProfileHeaderVm {
    ProfileHeaderVm {
        display_name: profile.display_name_or_default().to_string(),
        email: profile.email().map(str::to_owned),
        photo_url: profile.photo_url().map(str::to_owned),
        initials: profile.initials(),
        member_since: t.t_with(
            "Member since {date}",
            &[("date", format_month_year(profile.created_at()))],
        ),
    }
}

#[must_use]
pub fn map_progress(results: &[QuizResult]) -> ProgressVm {
    let report = ProgressReport::from_results(results);
    let by_topic = report
        .by_topic
        .iter()
        .map(|topic| BarVm {
            label: topic.topic.clone(),
            percent: topic.average_percent,
            detail: format!("{}% ({})", topic.average_percent, topic.attempts),
        })
        .collect();
    let by_month = report
        .by_month
        .iter()
        .map(|month| BarVm {
            label: format!("{} {}", month.label(), month.year),
            percent: month.average_percent,
            detail: format!("{}%", month.average_percent),
        })
        .collect();
    ProgressVm { by_topic, by_month }
}
