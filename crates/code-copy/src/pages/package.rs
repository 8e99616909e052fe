use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

use crate::catalog;
use crate::components::{CodeBlock, Section};

#[component]
pub fn PackagePage() -> impl IntoView {
    let params = use_params_map();
    let package = move || params.with(|p| p.get("name")).and_then(|name| catalog::find(&name));

    move || match package() {
        Some(package) => view! {
            <Title text=format!("{} - Ryton Store", package.name) />
            <main class="container py-4">
                <a href="/">"\u{2190} all packages"</a>
                <h1 class="mt-2">{package.name}</h1>
                <p>{package.summary}</p>

                <Section id="install" title="Install">
                    <CodeBlock code=package.install language="shell" />
                </Section>

                <Section id="usage" title="Usage">
                    <CodeBlock code=package.example language=package.language />
                </Section>
            </main>
        }
        .into_any(),
        None => view! {
            <main class="container py-4">
                <p>"Package not found. " <a href="/">"Back to all packages"</a></p>
            </main>
        }
        .into_any(),
    }
}
