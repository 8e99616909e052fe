use leptos::prelude::*;

use crate::config::DEFAULT_BLOCK_CLASS;

/// Literal code in the markup the browser-side copy controls look for:
/// a `.code-block` wrapper around `<pre><code>`.
#[component]
pub fn CodeBlock(
    /// Text shown, and copied, verbatim
    #[prop(into)]
    code: String,
    /// Highlighter hint, rendered as `language-<name>` on the `<code>` element
    #[prop(optional, into)]
    language: Option<String>,
) -> impl IntoView {
    let code = match language {
        Some(lang) => view! { <code class=format!("language-{}", lang)>{code}</code> }.into_any(),
        None => view! { <code>{code}</code> }.into_any(),
    };

    view! {
        <div class=DEFAULT_BLOCK_CLASS>
            <pre>{code}</pre>
        </div>
    }
}
