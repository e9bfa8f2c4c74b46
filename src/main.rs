mod actor;
mod appsettings;
mod console;
mod picker;
mod reminder;
mod screen;
mod status;

use std::sync::Arc;

use appsettings::AppSettings;
use console::ConsoleScreen;
use picker::LocalClock;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = AppSettings::load()?;

    let mut logger = pretty_env_logger::formatted_builder();
    logger.parse_filters(&settings.logging.level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.try_init()?;

    log::info!("Starting reminder screen");

    ConsoleScreen::new(settings.screen, Arc::new(LocalClock))
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
