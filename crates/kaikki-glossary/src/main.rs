use std::time::Instant;

use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use kaikki_glossary::{Config, revision_today, run};
use kaikki_pos::PosTable;
use kaikki_types::IndexDescriptor;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    info!(
        "building {} -> {} glossary",
        config.source_iso, config.target_iso
    );
    info!(
        "reading {} (mode: {:?})",
        config.kaikki_file.display(),
        config.read_mode
    );
    info!("writing to {}", config.dict_dir().display());

    let pos_table = PosTable::load(&config.pos_table)?;
    info!(
        "loaded {} part-of-speech aliases from {}",
        pos_table.len(),
        config.pos_table.display()
    );

    let index = IndexDescriptor::gloss(&config.source_iso, &config.target_iso, revision_today());
    let start = Instant::now();
    let summary = run(&config, &pos_table, index)?;
    info!(
        "glossary built in {} ms: {} rows in {} term banks",
        start.elapsed().as_millis(),
        summary.rows,
        summary.written.term_banks
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
