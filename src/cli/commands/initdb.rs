use crate::config::Config;
use crate::db::Store;

pub async fn cmd_initdb(config: &Config, drop: bool) -> anyhow::Result<()> {
    // Connecting applies pending migrations.
    let store = Store::from_config(&config.general).await?;

    if drop {
        store.reset().await?;
    }

    println!("✓ Initialized database: {}", config.general.database_path);
    Ok(())
}
