use dioxus::prelude::*;
use services::AudioClip;

#[component]
pub fn PageHeader(title: String, description: String) -> Element {
    rsx! {
        header { class: "page-header",
            h2 { "{title}" }
            p { class: "muted", "{description}" }
        }
    }
}

#[component]
pub fn ErrorCard(title: String, message: String) -> Element {
    rsx! {
        div { class: "card error-card", role: "alert",
            h3 { "{title}" }
            p { "{message}" }
        }
    }
}

/// Sanitized HTML produced by `vm::markdown_to_html`.
#[component]
pub fn RichText(html: String) -> Element {
    rsx! {
        div { class: "rich-text", dangerous_inner_html: "{html}" }
    }
}

/// Plays a clip once it mounts.
#[component]
pub fn AudioPlayer(
    clip: AudioClip,
    on_finished: EventHandler<()>,
    on_failed: EventHandler<()>,
) -> Element {
    rsx! {
        audio {
            class: "audio-player",
            src: "{clip.data_uri()}",
            autoplay: true,
            controls: true,
            onended: move |_| on_finished.call(()),
            onerror: move |_| on_failed.call(()),
        }
    }
}
