pub(super) fn copy_to_clipboard_script(text: &str) -> String {
    format!("await navigator.clipboard.writeText({text:?}); return true;")
}

pub(super) const SCROLL_TO_END_SCRIPT: &str =
    "document.getElementById('chat-end')?.scrollIntoView({ behavior: 'smooth' });";
