pub mod category;
pub mod clock;
pub mod config;
pub mod error;

pub use category::Category;
pub use clock::kst_now;
pub use config::{ApiKeys, Config, EndpointConfig, LlmConfig, ServerConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Haru core initialized");
    Ok(())
}
