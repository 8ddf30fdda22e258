//! daisy TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;

pub use app::App;

use daisy_core::{config::{ApiKeys, Config}, Catalog};
use daisy_provider::{HttpProvider, ProviderConfig};

/// Start the TUI on `catalog`'s tab.
///
/// Builds the tokio runtime that the search sessions run on; the render loop
/// itself stays on the calling thread.
pub fn run(config: Config, catalog: Catalog) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("daisy-worker")
        .build()?;
    let _guard = runtime.enter();

    let keys = ApiKeys::load(&config.keys_path())?;
    let provider = HttpProvider::new(ProviderConfig::from_config(&config, &keys))?;
    let sessions =
        app::SessionFactory::new(Arc::new(provider), config.data_dir(), config.search_options());
    let theme = theme::Theme::by_name(&config.ui.theme);

    App::new(catalog, sessions, config, theme).run()
}
