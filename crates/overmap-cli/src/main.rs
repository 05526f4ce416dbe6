//! overmap - plan multi-waypoint routes across the game overview map.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use overmap_cli::{load_grid, Config, RouteStore};
use overmap_core::{PlannerSession, Route};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Cell data JSON (overrides OVERMAP_CELLS)
    #[arg(long)]
    cells: Option<String>,

    /// Route store JSON (overrides OVERMAP_ROUTES)
    #[arg(long)]
    routes: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route through waypoints given as lat,lng or lat,lng,name
    Plan {
        #[arg(required = true, num_args = 2..)]
        waypoints: Vec<String>,

        /// Save the waypoint list under this name
        #[arg(long)]
        save: Option<String>,
    },
    /// Recompute and print a saved route
    Show { name: String },
    /// List saved routes
    List,
    /// Delete a saved route
    Delete { name: String },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("overmap_cli=info".parse()?)
                .add_directive("overmap_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(cells) = cli.cells {
        config.cell_data_path = cells;
    }
    if let Some(routes) = cli.routes {
        config.route_store_path = routes;
    }
    let store = RouteStore::new(&config.route_store_path);

    match cli.command {
        Command::Plan { waypoints, save } => plan(&config, &store, &waypoints, save),
        Command::Show { name } => show(&config, &store, &name),
        Command::List => list(&store),
        Command::Delete { name } => delete(&store, &name),
    }
}

fn open_session(config: &Config) -> Result<PlannerSession> {
    let grid = load_grid(Path::new(&config.cell_data_path))?;
    Ok(PlannerSession::new(grid).with_road_search_radius(config.road_search_radius))
}

fn plan(config: &Config, store: &RouteStore, specs: &[String], save: Option<String>) -> Result<()> {
    let mut session = open_session(config)?;
    for spec in specs {
        let (lat, lng, name) = parse_waypoint(spec)?;
        session.add_waypoint(lat, lng, name);
    }

    let route = session.compute_route()?;
    print_route(route);

    if let Some(name) = save {
        let saved = session.save_route(&name)?;
        store.save(saved)?;
        println!("Saved route \"{}\" to {}", name, store.path().display());
    }
    Ok(())
}

fn show(config: &Config, store: &RouteStore, name: &str) -> Result<()> {
    let Some(saved) = store.get(name) else {
        bail!("no saved route named \"{}\"", name);
    };
    let mut session = open_session(config)?;
    session.load_route(&saved);
    match session.route() {
        Some(route) => print_route(route),
        None => bail!("saved route \"{}\" has fewer than 2 waypoints", name),
    }
    Ok(())
}

fn list(store: &RouteStore) -> Result<()> {
    let routes = store.load_all();
    if routes.is_empty() {
        println!("No saved routes in {}", store.path().display());
        return Ok(());
    }
    for route in routes {
        println!(
            "{}  ({} waypoints, saved {})",
            route.name,
            route.waypoints.len(),
            route.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn delete(store: &RouteStore, name: &str) -> Result<()> {
    if store.delete(name)? {
        println!("Deleted route \"{}\"", name);
    } else {
        println!("No saved route named \"{}\"", name);
    }
    Ok(())
}

fn print_route(route: &Route) {
    println!("{}", route.summary());
    for (idx, kind) in route.segment_kinds.iter().enumerate() {
        println!("  segment {}: {}", idx + 1, kind.label());
    }
    for point in &route.points {
        println!("  {:.1}, {:.1}", point.lat, point.lng);
    }
}

/// Parse a waypoint spec of the form "lat,lng" or "lat,lng,name".
fn parse_waypoint(spec: &str) -> Result<(f64, f64, Option<String>)> {
    let mut parts = spec.splitn(3, ',');
    let lat: f64 = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .with_context(|| format!("bad latitude in waypoint \"{}\"", spec))?;
    let lng: f64 = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .with_context(|| format!("bad longitude in waypoint \"{}\"", spec))?;
    let name = parts
        .next()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    Ok((lat, lng, name))
}
