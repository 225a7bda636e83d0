use equipcare_backend_rust::start_web_server;

#[tokio::main]
async fn main() {
    println!("Initializing the app...");
    start_web_server().await;
}
