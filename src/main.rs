use anyhow::Result;
use skycard_core::Config;
use skycard_weather::{FileStore, WeatherWidget};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    skycard_core::init()?;

    let (config, _) = Config::load_validated()?;
    let store = Arc::new(FileStore::open(&config.data_dir)?);
    let mut widget = WeatherWidget::new(&config.weather, store)?;

    // Failures are already rendered into the view
    if let Err(e) = widget.start(&config.catalog.source).await {
        tracing::warn!("Widget started with errors: {}", e);
    }

    tracing::info!("Skycard widget ready");

    let selector = widget.selector();
    let view = widget.view();
    println!("Skycard - 7 day forecast");
    println!("City: {} ({} available)", selector.label(), selector.options().len());
    println!("{}", view.toggle_html());
    println!("\n<div id=\"current-day\">{}</div>", view.current_day_html());
    println!("<div id=\"next-days\">{}</div>", view.next_days_html());
    if !view.announcement().is_empty() {
        println!("\n<div id=\"sr-announcer\" aria-live=\"polite\">{}</div>", view.announcement());
    }

    Ok(())
}
