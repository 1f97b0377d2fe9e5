#[tokio::main]
async fn main() {
    ctran_server::start_server().await;
}
