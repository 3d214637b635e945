use async_trait::async_trait;
use rust_decimal::Decimal;

use super::models::{Product, ProductId, ProductInput};
use super::page::{Page, Pageable};

/// Persistence contract for products.
///
/// Every query takes a [`Pageable`], so each one serves both the paged and the
/// unpaged form. Name matching is a case-insensitive substring match and price
/// bounds are inclusive. Implementations own id assignment and result order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product and return it with its assigned id
    async fn insert(&self, input: ProductInput) -> anyhow::Result<Product>;

    /// Persist `product` under its id, replacing any stored version
    async fn save(&self, product: Product) -> anyhow::Result<Product>;

    async fn find_by_id(&self, id: ProductId) -> anyhow::Result<Option<Product>>;

    async fn delete_by_id(&self, id: ProductId) -> anyhow::Result<()>;

    async fn find_all(&self, pageable: Pageable) -> anyhow::Result<Page<Product>>;

    async fn find_by_name_contains(
        &self,
        name: &str,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_price_greater_or_equal(
        &self,
        min: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_price_less_or_equal(
        &self,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_name_contains_and_price_between(
        &self,
        name: &str,
        min: Decimal,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_name_contains_and_price_greater_or_equal(
        &self,
        name: &str,
        min: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;

    async fn find_by_name_contains_and_price_less_or_equal(
        &self,
        name: &str,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>>;
}
