use magazinehub::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("magazinehub".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    if let Err(error) = magazinehub::run().await {
        tracing::error!(err.msg = %error, err.details = ?error, "Server stopped with error");
        std::process::exit(1);
    }
}
