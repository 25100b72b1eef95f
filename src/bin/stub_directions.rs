use campus_route_sync::api::create_router;
use campus_route_sync::api::routes::DIRECTIONS_PATH;
use campus_route_sync::logging;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter())
        .init();

    let addr = std::env::var("STUB_DIRECTIONS_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let app = create_router();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind port");

    println!("Stub walking-directions service");
    println!("Listening on http://{}", addr);
    println!();
    println!("  POST {}?origin=<lat,lng>&destination=<lat,lng>&mode=walking&alternatives=false&steps=true&overview=full", DIRECTIONS_PATH);
    println!();
    println!("Point the engine at it with ROUTESYNC_DIRECTIONS_URL=http://{}{}", addr, DIRECTIONS_PATH);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
