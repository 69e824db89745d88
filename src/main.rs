// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routebundle CLI entrypoint.
//!
//! Loads a scene file and prints the longest common route of one link, as
//! text or (with `--json`) as a JSON summary. Set `RUST_LOG` to see the
//! engine's diagnostics on stderr.

use std::error::Error;
use std::io;

use routebundle::bundle::{CommonRoute, RouteFinder};
use routebundle::model::LinkId;
use routebundle::store::load_scene;
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <scene.json> <link-id> [--json]\n  {program} --help\n\nPrints the longest route <link-id> shares with other links in the scene.\n--json prints the route summary as JSON (`null` when there is none).\n\nDiagnostics go to stderr; set RUST_LOG (default `warn`) to change their level."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    help: bool,
    json: bool,
    scene_path: Option<String>,
    link_id: Option<String>,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ if options.scene_path.is_none() => options.scene_path = Some(arg),
            _ if options.link_id.is_none() => options.link_id = Some(arg),
            _ => return Err(()),
        }
    }

    if !options.help && (options.scene_path.is_none() || options.link_id.is_none()) {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn render_text(link_id: &LinkId, route: Option<&CommonRoute>) -> String {
    let Some(route) = route else {
        return format!("{link_id}: no common route");
    };
    let summary = route.summary();
    let mut out = format!(
        "{link_id}: bundled with {}\n  from {} to {}\n  length {}, end knots {}",
        summary.links.join(", "),
        route.from(),
        route.to(),
        summary.length,
        summary.end_knots
    );
    if !summary.knots.is_empty() {
        out.push_str(&format!("\n  via knots {}", summary.knots.join(", ")));
    }
    out
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "routebundle".to_owned());

        let options = match parse_options(args) {
            Ok(options) if options.help => {
                print_usage(&program);
                return Ok(());
            }
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        let (Some(scene_path), Some(raw_link_id)) = (options.scene_path, options.link_id) else {
            print_usage(&program);
            std::process::exit(2);
        };

        init_tracing();

        let scene = load_scene(&scene_path)?;
        let link_id = LinkId::new(&raw_link_id)?;
        let link = scene
            .tree
            .link(&link_id)
            .ok_or_else(|| format!("link {link_id} not found in {scene_path}"))?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let route = runtime.block_on(async {
            RouteFinder::with_settings(&scene.tree, scene.settings)
                .find_longest_common_route(&link)
                .await
        });

        if options.json {
            let summary = route.as_ref().map(CommonRoute::summary);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("{}", render_text(&link_id, route.as_ref()));
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("routebundle: {err}");
        std::process::exit(1);
    }
}
