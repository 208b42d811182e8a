use anyhow::Context;
use quarry_config::QuarryConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered configuration, and command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QuarryConfig> {
    let mut config = QuarryConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load quarry configuration")?;

    if let Some(source) = &flags.source {
        config.source.path = source.to_string_lossy().into_owned();
    }

    tracing::debug!(
        source = %config.source.path,
        remote = config.store.is_remote(),
        database = %config.store.database,
        batch_size = config.pipeline.batch_size,
        "configuration loaded"
    );
    Ok(config)
}
