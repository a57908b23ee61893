use clap::Args;
use serde_json::json;

use super::PrincipalArgs;
use crate::cli::utils::{output_json, print_diagnostics, print_route_tree};
use crate::cli::OutputFormat;
use crate::routes::{filter_routes, RouteAccess};

#[derive(Args, Debug)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub session: PrincipalArgs,

    #[arg(long, help = "Also list the permission code index")]
    pub index: bool,

    #[arg(long, value_name = "ROUTE_NAME", help = "Run the router guard for one named route")]
    pub check: Option<String>,
}

pub fn handle(args: RoutesArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let engine = args.session.engine()?;
    let principal = args.session.principal()?;
    let allowed = filter_routes(engine.routes(), &principal.permissions);
    let permission_index = engine.permission_index();

    if let Some(name) = &args.check {
        let Some(granted) = engine.check_access(name, Some(&principal)) else {
            anyhow::bail!("route '{}' is not in the route table", name);
        };
        return match output_format {
            OutputFormat::Json => output_json(&json!({ "route": name, "granted": granted })),
            OutputFormat::Text => {
                println!("{}: {}", name, if granted { "granted" } else { "denied" });
                Ok(())
            }
        };
    }

    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "routes": allowed,
                "allowed": RouteAccess::count(&allowed),
                "total": RouteAccess::count(engine.routes()),
            });
            if args.index {
                let mut entries: Vec<_> = permission_index.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                response["index"] = json!(entries
                    .into_iter()
                    .map(|(code, target)| json!({ "code": code, "path": target.path, "name": target.name }))
                    .collect::<Vec<_>>());
            }
            output_json(&response)
        }
        OutputFormat::Text => {
            print_route_tree(&allowed, 0);
            println!(
                "{} of {} routes allowed",
                RouteAccess::count(&allowed),
                RouteAccess::count(engine.routes())
            );
            if args.index {
                let mut entries: Vec<_> = permission_index.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                println!("Permission index:");
                for (code, target) in entries {
                    println!("  {} -> {} ({})", code, target.path, target.name);
                }
            }
            print_diagnostics(permission_index.diagnostics());
            Ok(())
        }
    }
}
