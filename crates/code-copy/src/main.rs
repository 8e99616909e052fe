#[cfg(feature = "ssr")]
mod cli {
    use clap::Parser;
    use std::path::PathBuf;

    /// Serve the package pages with copy buttons on their code blocks
    #[derive(Parser, Debug)]
    #[command(name = "code-copy", version)]
    pub struct Args {
        /// TOML file with a [copy] table; defaults are used when omitted
        #[arg(long, env = "CODE_COPY_CONFIG")]
        pub config: Option<PathBuf>,
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::Router;
    use clap::Parser;
    use code_copy::components::CopyConfigScript;
    use code_copy::config::CopyConfig;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;

    /// Loads the wasm bundle; its start function enhances the page.
    const BOOT_SCRIPT: &str = "import init from '/pkg/code-copy.js'; init();";

    let args = cli::Args::parse();
    let copy_config = match &args.config {
        Some(path) => {
            let config = CopyConfig::load(path)?;
            println!("[config] Loaded copy config from {}", path.display());
            config
        }
        None => {
            println!("[config] No config file given, using defaults");
            CopyConfig::default()
        }
    };

    let conf = get_configuration(None).context("Failed to load Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(code_copy::app::App);

    let site_root = leptos_options.site_root.clone();
    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            move || {
                use code_copy::app::App;
                let config = copy_config.clone();
                view! {
                    <!DOCTYPE html>
                    <html lang="en">
                        <head>
                            <meta charset="utf-8" />
                            <meta name="viewport" content="width=device-width, initial-scale=1" />
                            <meta name="description" content="Ryton Store - packages with one-click install commands." />
                            <title>"Ryton Store"</title>
                            <link
                                rel="stylesheet"
                                href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"
                            />
                            <link
                                rel="stylesheet"
                                href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css"
                            />
                            <CopyConfigScript config=config />
                            <script type="module" inner_html=BOOT_SCRIPT></script>
                        </head>
                        <body>
                            <App />
                        </body>
                    </html>
                }
            }
        })
        .fallback_service(ServeDir::new(&*site_root))
        .layer(CompressionLayer::new())
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("[server] Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Client builds enter through the wasm start function in lib.rs
}
