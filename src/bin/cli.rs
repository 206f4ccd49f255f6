use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    atelier::cli::run().await
}
