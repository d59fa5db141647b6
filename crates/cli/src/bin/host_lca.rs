use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    host_lca_cli::main_entry().await
}
