use std::io;

use portfolio_contact::config::get_configuration;
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> io::Result<()> {
    let subscriber = get_subscriber(
        String::from("portfolio_contact"),
        String::from("info"),
        io::stdout,
    );

    init_subscriber(subscriber).map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let config = get_configuration().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Failed to read configuration: {}", err),
        )
    })?;
    let application = Application::build(config).await?;

    tracing::info!("Server listening on port {}", application.get_port());

    application.run_until_stop().await
}
