pub mod filter;
pub mod memory;
pub mod models;
pub mod page;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use routes::ProductsState;
use service::ProductService;
use store::ProductStore;

/// Product catalog module: CRUD plus filtered and paginated listings
pub struct ProductsModule {
    state: ProductsState,
}

impl ProductsModule {
    pub fn new(store: Arc<dyn ProductStore>, catalog: CatalogSettings) -> Self {
        Self {
            state: ProductsState {
                service: Arc::new(ProductService::new(store)),
                catalog,
            },
        }
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            default_page_size = self.state.catalog.default_page_size,
            max_page_size = self.state.catalog.max_page_size,
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module stopped");
        Ok(())
    }
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let product_ref = json!({ "$ref": "#/components/schemas/Product" });
    let page_ref = json!({ "$ref": "#/components/schemas/ProductPage" });
    let request_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ProductRequest" }
            }
        }
    });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    });
    let page_params = json!([
        { "name": "page", "in": "query", "required": false, "schema": { "type": "integer", "minimum": 0, "default": 0 } },
        { "name": "size", "in": "query", "required": false, "schema": { "type": "integer", "minimum": 1 } }
    ]);
    let filter_params = json!([
        { "name": "name", "in": "query", "required": false, "description": "Case-insensitive name substring", "schema": { "type": "string" } },
        { "name": "min_price", "in": "query", "required": false, "schema": { "type": "string", "format": "decimal" } },
        { "name": "max_price", "in": "query", "required": false, "schema": { "type": "string", "format": "decimal" } }
    ]);
    let mut filter_and_page_params = filter_params.as_array().cloned().unwrap_or_default();
    filter_and_page_params.extend(page_params.as_array().cloned().unwrap_or_default());

    let filtered_listing = json!({
        "summary": "List products matching optional filters, one page at a time",
        "tags": ["Products"],
        "parameters": filter_and_page_params,
        "responses": {
            "200": json_response("Page of products", page_ref.clone()),
            "400": error_response("Malformed query"),
            "422": error_response("Invalid page size")
        }
    });

    json!({
        "paths": {
            "/": {
                "get": filtered_listing.clone(),
                "post": {
                    "summary": "Create a product",
                    "tags": ["Products"],
                    "requestBody": request_body.clone(),
                    "responses": {
                        "201": json_response("Created product", product_ref.clone()),
                        "400": error_response("Malformed body"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/search": { "get": filtered_listing },
            "/all": {
                "get": {
                    "summary": "List every product matching optional filters",
                    "tags": ["Products"],
                    "parameters": filter_params,
                    "responses": {
                        "200": json_response("Products", json!({ "type": "array", "items": product_ref.clone() })),
                        "400": error_response("Malformed query")
                    }
                }
            },
            "/paginated": {
                "get": {
                    "summary": "List all products, one page at a time",
                    "tags": ["Products"],
                    "parameters": page_params,
                    "responses": {
                        "200": json_response("Page of products", page_ref),
                        "422": error_response("Invalid page size")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Products health check",
                    "tags": ["Products"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a product",
                    "tags": ["Products"],
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": json_response("Product", product_ref.clone()),
                        "404": error_response("Product not found")
                    }
                },
                "put": {
                    "summary": "Replace every field of a product",
                    "tags": ["Products"],
                    "parameters": [id_param.clone()],
                    "requestBody": request_body,
                    "responses": {
                        "200": json_response("Updated product", product_ref),
                        "404": error_response("Product not found"),
                        "422": error_response("Validation error")
                    }
                },
                "delete": {
                    "summary": "Delete a product",
                    "tags": ["Products"],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("Product not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64", "description": "Identifier assigned on creation" },
                        "name": { "type": "string", "description": "Display name" },
                        "price": { "type": "string", "format": "decimal", "description": "Unit price" },
                        "description": { "type": ["string", "null"] },
                        "image_url": { "type": ["string", "null"] }
                    },
                    "required": ["id", "name", "price"]
                },
                "ProductRequest": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "minLength": 3, "maxLength": 100 },
                        "price": { "type": "string", "format": "decimal", "description": "Strictly positive" },
                        "description": { "type": ["string", "null"], "maxLength": 2000 },
                        "image_url": { "type": ["string", "null"], "maxLength": 255 }
                    },
                    "required": ["name", "price"]
                },
                "ProductPage": {
                    "type": "object",
                    "properties": {
                        "items": { "type": "array", "items": { "$ref": "#/components/schemas/Product" } },
                        "page": { "type": "integer" },
                        "size": { "type": "integer" },
                        "total_elements": { "type": "integer", "format": "int64" },
                        "total_pages": { "type": "integer", "format": "int64" }
                    },
                    "required": ["items", "page", "size", "total_elements", "total_pages"]
                }
            }
        }
    })
}

/// Create a new instance of the products module
pub fn create_module(store: Arc<dyn ProductStore>, catalog: CatalogSettings) -> Arc<dyn Module> {
    Arc::new(ProductsModule::new(store, catalog))
}
