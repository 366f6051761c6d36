use anyhow::Result;
use rusty_vk_bootstrap::{
    init_logging, AppConfig, AshLoader, GlfwWindowSystem, ResourceManager, Tier,
};
use tracing::{error, info};

fn main() -> Result<()> {
    init_logging()?;
    let config = AppConfig::from_env()?;
    info!(
        "Starting {} (validation {})",
        config.application.application_name,
        if config.validation { "on" } else { "off" }
    );

    let mut resource_manager =
        ResourceManager::new(GlfwWindowSystem::default(), AshLoader::default());
    let outcome = resource_manager.bootstrap(&config);
    match &outcome {
        Ok(()) => {
            let functions = resource_manager.functions();
            for tier in [Tier::Global, Tier::Instance] {
                let count = functions.tier(tier).map_or(0, |resolved| resolved.len());
                info!("{} level functions loaded: {}", tier, count);
            }
            info!(
                "Enabled layers: [{}]",
                resource_manager.graphics().enabled_layers().join(", ")
            );
        }
        Err(err) => error!("{}", err),
    }

    resource_manager.release_all();
    outcome?;
    Ok(())
}
