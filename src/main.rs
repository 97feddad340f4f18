use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use starmap_viewer::data::{parse_catalog, DataError, StarRecord};
use starmap_viewer::{Viewer, ViewerConfig};

/// Upper bound on frames driven by the headless loop (about 10 s at 60 Hz).
const MAX_FRAMES: u32 = 600;
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

async fn load_catalog(config: &ViewerConfig) -> Result<Vec<StarRecord>, DataError> {
    let bytes = tokio::fs::read(&config.catalog_path).await?;
    parse_catalog(&bytes)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ViewerConfig::from_file(&path)
            .with_context(|| format!("failed to read viewer config {}", path))?,
        None => ViewerConfig::default(),
    };
    let focus_name = args.next();

    let mut viewer = Viewer::new(config);
    let ticket = viewer.begin_load();
    let result = load_catalog(viewer.config()).await;
    viewer.finish_load(ticket, result);
    info!("catalog ready with {} stars", viewer.scene().len());

    let clock = Instant::now();
    if let Some(name) = focus_name.as_deref() {
        match viewer.select_by_name(name) {
            Some(_) => {
                viewer.context_menu(clock.elapsed().as_secs_f64());
            }
            None => warn!("no star named {:?} in catalog", name),
        }
    }

    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    for _ in 0..MAX_FRAMES {
        ticker.tick().await;
        viewer.frame(clock.elapsed().as_secs_f64());
        if !viewer.is_focusing() {
            break;
        }
    }

    let snapshot = viewer.snapshot();
    viewer.teardown();

    let json = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{}", json);
    Ok(())
}
