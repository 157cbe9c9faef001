#[tokio::main]
async fn main() {
    if let Err(e) = pelagia::run().await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}
