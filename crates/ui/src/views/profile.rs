use buddy_core::model::{QuizResult, UserProfile};
use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::context::{AppContext, use_translator};
use crate::views::ViewState;
use crate::views::components::{ErrorCard, PageHeader};
use crate::vm::{BarVm, ProfileHeaderVm, map_profile_header, map_progress};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let t = use_translator();
    let profiles = ctx.profiles();
    let viewer = profiles.as_ref().and_then(|service| service.viewer());

    let mut profile = use_signal(|| ViewState::<Option<UserProfile>>::Loading);
    let mut results = use_signal(|| ViewState::<Vec<QuizResult>>::Loading);
    let mut denied = use_signal(|| false);

    // Permission failures end a subscription and are reported here.
    use_future({
        let profiles = profiles.clone();
        move || {
            let profiles = profiles.clone();
            async move {
                let Some(profiles) = profiles else {
                    return;
                };
                let mut errors = profiles.errors().subscribe();
                loop {
                    match errors.recv().await {
                        Ok(err) => {
                            warn!(path = %err.path, operation = %err.operation, "profile access denied");
                            denied.set(true);
                        }
                        Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }
    });

    use_future({
        let profiles = profiles.clone();
        let viewer = viewer.clone();
        move || {
            let profiles = profiles.clone();
            let viewer = viewer.clone();
            async move {
                let (Some(profiles), Some(viewer)) = (profiles, viewer) else {
                    return;
                };
                let mut subscription = profiles.subscribe_profile(viewer);
                while let Some(snapshot) = subscription.next().await {
                    profile.set(ViewState::Ready(snapshot));
                }
            }
        }
    });

    use_future({
        let profiles = profiles.clone();
        let viewer = viewer.clone();
        move || {
            let profiles = profiles.clone();
            let viewer = viewer.clone();
            async move {
                let (Some(profiles), Some(viewer)) = (profiles, viewer) else {
                    return;
                };
                let mut subscription = profiles.subscribe_results(viewer);
                while let Some(snapshot) = subscription.next().await {
                    results.set(ViewState::Ready(snapshot));
                }
            }
        }
    });

    let header = rsx! {
        PageHeader {
            title: t.t("User Profile"),
            description: t.t("View your details, track your progress, and see how you're improving."),
        }
    };

    if profiles.is_none() {
        return rsx! {
            div { class: "page profile-page",
                {header}
                p { class: "muted", {t.t("Profiles are not configured.")} }
            }
        };
    }
    if viewer.is_none() {
        return rsx! {
            div { class: "page profile-page",
                {header}
                p { class: "muted", {t.t("Not signed in.")} }
            }
        };
    }

    let profile_card = match profile() {
        ViewState::Ready(Some(stored)) => Some(map_profile_header(&stored, &t)),
        _ => None,
    };
    let progress = match results() {
        ViewState::Ready(rows) => Some(map_progress(&rows)),
        _ => None,
    };

    rsx! {
        div { class: "page profile-page",
            {header}

            if denied() {
                ErrorCard {
                    title: t.t("Error"),
                    message: t.t("You do not have access to this profile."),
                }
            }

            match profile_card {
                Some(card) => rsx! {
                    ProfileCard { card }
                },
                None => rsx! {
                    p { class: "muted", {t.t("Loading...")} }
                },
            }

            section { class: "card progress-card",
                h3 { {t.t("Progress Tracking")} }
                p { class: "muted", {t.t("Your performance across different topics and over time.")} }
                match progress {
                    None => rsx! {
                        p { class: "muted", {t.t("Loading...")} }
                    },
                    Some(progress) if progress.is_empty() => rsx! {
                        p { class: "muted", {t.t("No quizzes completed yet.")} }
                    },
                    Some(progress) => rsx! {
                        BarChart { title: t.t("Quiz Scores by Topic"), bars: progress.by_topic }
                        BarChart { title: t.t("Progress Over Time"), bars: progress.by_month }
                    },
                }
            }
        }
    }
}

#[component]
fn ProfileCard(card: ProfileHeaderVm) -> Element {
    rsx! {
        section { class: "card profile-card",
            div { class: "avatar",
                if let Some(url) = card.photo_url.clone() {
                    img { src: "{url}", alt: "{card.display_name}" }
                } else {
                    span { class: "avatar-initials", "{card.initials}" }
                }
            }
            div { class: "profile-details",
                h3 { "{card.display_name}" }
                if let Some(email) = card.email.clone() {
                    p { class: "muted", "{email}" }
                }
                p { class: "muted", "{card.member_since}" }
            }
        }
    }
}

#[component]
fn BarChart(title: String, bars: Vec<BarVm>) -> Element {
    rsx! {
        div { class: "bar-chart",
            h4 { "{title}" }
            for bar in bars {
                div { class: "bar-row", key: "{bar.label}",
                    span { class: "bar-label", "{bar.label}" }
                    div { class: "bar-track",
                        div { class: "bar-fill", style: "width: {bar.percent}%" }
                    }
                    span { class: "bar-value", "{bar.detail}" }
                }
            }
        }
    }
}
