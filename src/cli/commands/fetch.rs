use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::cli::utils::{output_json, print_diagnostics, print_menu_tree};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::navigation::{HttpSessionSource, NavigationEngine, NavigationStore};
use crate::routes::load_route_table;

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[arg(long, help = "Route table file (YAML or JSON)")]
    pub routes: PathBuf,

    #[arg(long, env = "NAV_SOURCE_TOKEN", help = "Bearer token for the backend")]
    pub token: Option<String>,

    #[arg(long = "route", help = "Also resolve navigation for this route name")]
    pub route_name: Option<String>,
}

pub async fn handle(args: FetchArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let settings = config();
    let engine = NavigationEngine::from_config(load_route_table(&args.routes)?, &settings.navigation)?;
    let store = NavigationStore::new(engine);

    let mut source = HttpSessionSource::new(&settings.source)?;
    if let Some(token) = args.token {
        source = source.with_token(token);
    }

    let outcome = store.reload(&source).await;
    let snapshot = store.snapshot();
    let state = args
        .route_name
        .as_deref()
        .map(|route| snapshot.query().navigation_state(route));

    match output_format {
        OutputFormat::Json => output_json(&json!({
            "applied": outcome.is_applied(),
            "state": store.state(),
            "user": snapshot.principal.username,
            "menus": snapshot.tree.to_views(),
            "navigation": state,
            "diagnostics": snapshot.diagnostics,
        })),
        OutputFormat::Text => {
            println!(
                "Loaded navigation for '{}' from {}",
                snapshot.principal.username, settings.source.base_url
            );
            print_menu_tree(&snapshot.tree);
            if let Some(state) = state {
                println!("Route {}: {}", state.route_name, state.active_menu_ids.join(" > "));
            }
            print_diagnostics(&snapshot.diagnostics);
            Ok(())
        }
    }
}
