use std::sync::Arc;
use std::time::Duration;

use campus_route_sync::logging;
use campus_route_sync::{
    ChannelSurface, EngineConfig, HttpDirectionsClient, LocationTable, Result, RouteEngine,
    RouteOutcome, SymbolicLocation,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let source = SymbolicLocation::from(args.next().as_deref().unwrap_or("Block2"));
    let destination =
        SymbolicLocation::from(args.next().as_deref().unwrap_or("CentreForAdvancedStudies"));

    let locations = match std::env::var("ROUTESYNC_LOCATIONS_CSV") {
        Ok(path) => LocationTable::from_csv_path(path)?,
        Err(_) => LocationTable::campus_default(),
    };

    eprintln!("campus-route-sync - route demo\n");
    for entry in locations.entries() {
        eprintln!(
            "  {:<28} {:>10.6}, {:>10.6}",
            entry.display_name, entry.coordinate.latitude, entry.coordinate.longitude
        );
    }
    eprintln!();

    let (surface, commands) = ChannelSurface::new();
    let engine = RouteEngine::new(
        Arc::new(HttpDirectionsClient::from_env()?),
        Arc::new(surface),
        locations,
        EngineConfig::default(),
    )?;

    match engine.request_route(&source, &destination, None).await {
        Ok(RouteOutcome::Applied(route)) => {
            eprintln!(
                "Route {} -> {}: {} points, {:.0} m",
                route.source,
                route.destination,
                route.path.len(),
                route.length_meters()
            );
        }
        Ok(RouteOutcome::Superseded { token }) => eprintln!("Request {} superseded", token),
        Err(e) => eprintln!("Route failed: {}", e),
    }

    if std::env::var_os("ROUTESYNC_TOUR").is_some() {
        engine.start_tour(&destination, None)?;
        engine.camera().run(Duration::from_millis(16)).await;
    }

    for command in commands.try_iter() {
        match command.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to encode command: {}", e),
        }
    }

    Ok(())
}
