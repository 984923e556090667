#[tokio::main]
async fn main() -> std::io::Result<()> {
    arcade_server::run_with_config().await
}
