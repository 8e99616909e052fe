//! Packages shown on the demo site.

pub struct Package {
    pub name: &'static str,
    pub summary: &'static str,
    pub install: &'static str,
    pub example: &'static str,
    /// Highlighter hint for `example`
    pub language: &'static str,
}

pub static PACKAGES: &[Package] = &[
    Package {
        name: "ryton-http",
        summary: "Minimal HTTP client with retries and JSON helpers.",
        install: "ryton install ryton-http",
        example: "import http\n\nresp = http.get(\"https://example.com/api\")\nprint(resp.json())",
        language: "python",
    },
    Package {
        name: "ryton-color",
        summary: "ANSI colors and styles for terminal output.",
        install: "ryton install ryton-color",
        example: "import color\n\nprint(color.green(\"ok\"), color.bold(\"done\"))",
        language: "python",
    },
    Package {
        name: "ryton-toml",
        summary: "TOML reader and writer.",
        install: "ryton install ryton-toml",
        example: "import toml\n\ncfg = toml.load(\"settings.toml\")\nprint(cfg[\"server\"][\"port\"])",
        language: "python",
    },
];

pub fn find(name: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.name == name)
}
