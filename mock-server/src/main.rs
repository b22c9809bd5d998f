use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let network_id =
        std::env::var("MEGAPHONE_NETWORK_ID").unwrap_or_else(|_| "mock-network".to_string());
    let token = std::env::var("MEGAPHONE_TOKEN").unwrap_or_else(|_| "mock-token".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    log::info!("serving network {network_id} on http://{addr}");
    mock_server::run(listener, &network_id, &token).await
}
