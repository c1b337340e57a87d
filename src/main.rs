use anyhow::Result;
use std::sync::Arc;

use haru_core::Config;
use haru_web::Dispatcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Keys usually live in a local .env file
    dotenv::dotenv().ok();

    haru_core::init()?;

    let (config, validation) = Config::load_validated()?;
    let addr = config.server.socket_addr()?;
    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);

    tracing::info!(
        "Haru started (model: {}, {} config warning(s))",
        config.llm.model,
        validation.warnings.len()
    );

    haru_web::serve(dispatcher, addr).await;

    Ok(())
}
