use leptos::prelude::*;

/// Titled block of a package page with an anchor link on the heading
#[component]
pub fn Section(#[prop(into)] id: String, #[prop(into)] title: String, children: Children) -> impl IntoView {
    let anchor_href = format!("#{}", id);

    view! {
        <section id=id class="mb-4">
            <h2 class="h5">
                {title}
                <a href=anchor_href class="section-anchor ms-1">"#"</a>
            </h2>
            {children()}
        </section>
    }
}
