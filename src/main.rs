#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = exambook::run().await {
        eprintln!("exambook fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
