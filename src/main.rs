use mltutor::{logger, server, Config};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init()?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_startup_info(&config);

    if config.gemini.api_key.is_none() {
        log::warn!("⚠️  GEMINI_API_KEY is not set; every request must carry an api_key");
    }

    config.dirs.ensure()?;
    server::run(config).await?;

    Ok(())
}
