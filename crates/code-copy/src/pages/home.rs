use leptos::prelude::*;
use leptos_meta::Title;

use crate::catalog::PACKAGES;
use crate::components::{CodeBlock, Section};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Ryton Store - Packages" />
        <main class="container py-4">
            <header class="mb-4">
                <h1>"Ryton Store"</h1>
                <p class="text-muted">"Packages for the Ryton language. Copy a command and paste it into your terminal."</p>
            </header>

            {PACKAGES.iter().map(|package| view! {
                <Section id=package.name title=package.name>
                    <p>{package.summary} " " <a href=format!("/package/{}", package.name)>"details \u{2192}"</a></p>
                    <CodeBlock code=package.install language="shell" />
                </Section>
            }).collect_view()}
        </main>
    }
}
