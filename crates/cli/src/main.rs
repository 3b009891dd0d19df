//! `prothunter` — terminal viewer for the supplement price feed.

mod config;
mod render;

use std::io::Write;

use anyhow::Context;

use prothunter_catalog::is_purity_sort_applicable;
use prothunter_feed::load_feed_path;

use crate::config::{CliConfig, OutputFormat};

fn main() -> anyhow::Result<()> {
    prothunter_observability::init();

    let config = CliConfig::from_env()?;
    let load = load_feed_path(&config.feed_path)
        .with_context(|| format!("failed to load feed {}", config.feed_path.display()))?;
    let catalog = load.into_catalog();

    let query = config.filter_state();
    let purity_sorts = is_purity_sort_applicable(query.category.as_str());
    if query.sort_key.needs_purity() && !purity_sorts {
        tracing::warn!(
            sort_key = query.sort_key.as_str(),
            category = query.category.as_str(),
            "sort is not meaningful for this category; products without purity go last"
        );
    }

    let view = catalog.view(&query);
    tracing::info!(
        shown = view.len(),
        total = catalog.len(),
        rejected = catalog.rejected().len(),
        "view ready"
    );

    let mut out = std::io::stdout().lock();
    match config.output {
        OutputFormat::Table => {
            render::table(&view, &mut out).context("failed to write table")?;
            writeln!(
                out,
                "purity sorts {} for category {:?}",
                if purity_sorts { "available" } else { "unavailable" },
                query.category.as_str()
            )?;
        }
        OutputFormat::Json => render::json(&view, &mut out).context("failed to write JSON")?,
    }

    Ok(())
}
