use buddy_core::model::{ChatLog, QuizSession};
use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::{AppContext, Theme, provide_ui_state, use_translator};
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = provide_ui_state(
        ctx.initial_language(),
        Theme::default(),
        ChatLog::new(),
        QuizSession::new(),
    );
    let app_name = use_translator().t("App Name");
    let theme = (ui.theme)();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles are rendered inside the right pane.
        document::Title { "{app_name}" }

        div { class: "app-root {theme.class_name()}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
