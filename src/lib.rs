//! Product catalog application library
//!
//! Feature modules and the wiring that turns settings into a served router.

pub mod modules;

use axum::Router;
use catalog_kernel::{settings::Settings, ModuleRegistry};

/// Registry holding every application module
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)?;
    Ok(registry)
}

/// Full HTTP application for `settings`
pub fn build_app(settings: &Settings) -> anyhow::Result<Router> {
    let registry = build_registry(settings)?;
    Ok(catalog_http::build_router(&registry, settings))
}
