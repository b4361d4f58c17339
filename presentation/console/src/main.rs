use dotenvy::dotenv;

mod config;
mod setup;
mod view;

use config::app_config::AppConfig;
use setup::dependency_injection::DependencyContainer;
use view::console::Console;

/// Product console entry point
///
/// Loads configuration, wires dependencies and runs the interactive
/// search-and-delete view on a single-threaded runtime:
/// - config/: API and workflow timing configuration
/// - setup/: Dependency injection
/// - view/: Terminal rendering and input
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter, away from the prompt
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies
    let container = DependencyContainer::new(&config)?;

    // 5. Run the view
    Console::new(container).run().await
}
