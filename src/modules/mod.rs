pub mod products;

use std::sync::Arc;

use catalog_kernel::{settings::Settings, ModuleRegistry};

use products::memory::MemoryProductStore;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let store = Arc::new(MemoryProductStore::new());
    registry.register(products::create_module(store, settings.catalog.clone()))?;
    Ok(())
}
