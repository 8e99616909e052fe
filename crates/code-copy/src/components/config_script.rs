use leptos::prelude::*;

use crate::config::{CONFIG_ELEMENT_ID, CopyConfig};

/// JSON for embedding inside a `<script>` element. `</` is escaped so text
/// in labels can never close the element early.
pub fn embedded_json(config: &CopyConfig) -> String {
    match config.to_json() {
        Ok(json) => json.replace("</", "<\\/"),
        Err(e) => {
            eprintln!("[config] {:#}; embedding defaults", e);
            "{}".to_string()
        }
    }
}

/// Hands the server's copy config to the browser bundle.
#[component]
pub fn CopyConfigScript(config: CopyConfig) -> impl IntoView {
    view! { <script id=CONFIG_ELEMENT_ID type="application/json" inner_html=embedded_json(&config)></script> }
}
