#[tokio::main]
async fn main() -> anyhow::Result<()> {
    duolens_server::start().await
}
