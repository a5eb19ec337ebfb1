//! Demo: a tasks content tree behind the waymark rewrite chain.
//!
//! Resolves request URLs into dispatch paths (printing what a dispatcher
//! would see, including redirects) and builds URLs back from internal
//! paths. The content tree is either the configured `module_root` on disk
//! or a built-in in-memory tree with `tasks`, `tasks/add`, and `about`.
//!
//! ```text
//! tasks-demo resolve /en/tasks/42 /en/add /
//! tasks-demo build tasks --param task=42 --locale fr
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use waymark_core::locale::RequestSignals;
use waymark_core::logging::{routing_span, setup_logging};
use waymark_core::settings::Settings;
use waymark_core::{settings_loader, WaymarkResult};
use waymark_routing::{
    ContentTree, DispatchPath, FsTree, MemoryTree, ParamMap, Resolution, RouterChain,
    RoutingContext,
};

#[derive(Parser)]
#[command(name = "tasks-demo", version, about = "Resolve and build waymark URLs")]
struct Cli {
    /// Path to a TOML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve request URLs into dispatch paths.
    Resolve {
        /// URLs to resolve, e.g. "/en/tasks/42".
        urls: Vec<String>,

        /// `Accept-Language` header to use for locale detection.
        #[arg(long)]
        accept_language: Option<String>,

        /// Language-preference cookie value.
        #[arg(long)]
        cookie_language: Option<String>,
    },
    /// Build a request URL from a dispatch path and parameters.
    Build {
        /// The dispatch path, e.g. "tasks" or "tasks/add".
        path: String,

        /// Parameters as key=value pairs; repeatable.
        #[arg(long = "param")]
        params: Vec<String>,

        /// Locale to activate before building.
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> WaymarkResult<()> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => settings_loader::from_toml_file_with_env(path)?,
        None => settings_loader::from_env(),
    };
    setup_logging(&settings);

    let chain = RouterChain::localized(&settings, content_tree(&settings));
    let mut ctx = RoutingContext::from_settings(&settings);

    match cli.command {
        Command::Resolve {
            urls,
            accept_language,
            cookie_language,
        } => {
            let mut signals = RequestSignals::new();
            if let Some(value) = accept_language {
                signals = signals.with_accept_language(value);
            }
            if let Some(value) = cookie_language {
                signals = signals.with_cookie_language(value);
            }
            ctx.set_signals(signals);

            for url in urls {
                let span = routing_span(&uuid::Uuid::new_v4().to_string());
                let _guard = span.enter();
                match chain.resolve(&url, &mut ctx) {
                    Resolution::Dispatch { module, params } => {
                        if params.is_empty() {
                            println!("{url} -> dispatch {module}");
                        } else {
                            println!("{url} -> dispatch {module} ({})", params.urlencode());
                        }
                    }
                    Resolution::Redirect(redirect) => {
                        println!("{url} -> redirect {redirect}");
                    }
                }
            }
        }
        Command::Build {
            path,
            params,
            locale,
        } => {
            if let Some(code) = locale {
                ctx.locale_mut().set_active(&code);
            }

            let mut map = ParamMap::new_mutable();
            for pair in &params {
                let (key, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
                map.set(key, value)?;
            }

            let span = routing_span(&uuid::Uuid::new_v4().to_string());
            let _guard = span.enter();
            let url = chain.build_url(&DispatchPath::parse(&path), &map, &mut ctx);
            println!("{path} -> {url}");
        }
    }

    Ok(())
}

/// Uses the configured module root when present, otherwise the demo's
/// built-in in-memory tree.
fn content_tree(settings: &Settings) -> Arc<dyn ContentTree> {
    match &settings.module_root {
        Some(root) => Arc::new(FsTree::new(root)),
        None => {
            let mut tree = MemoryTree::new();
            tree.insert(&settings.default_module);
            tree.insert(&format!(
                "{}/{}",
                settings.default_module, settings.add_marker
            ));
            tree.insert("about");
            Arc::new(tree)
        }
    }
}
