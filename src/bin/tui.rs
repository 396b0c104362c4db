use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    maqui::tui::run().await
}
