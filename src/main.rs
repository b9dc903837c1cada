use anyhow::Result;
use exam_template_bot::app::App;
use exam_template_bot::config::Config;
use exam_template_bot::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // logging first, before anything can fail
    logging::init();

    // config.toml if present, then env overrides
    let config = Config::load();

    App::initialize(config).await?.run().await
}
