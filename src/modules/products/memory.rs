//! In-process product store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::models::{Product, ProductId, ProductInput};
use super::page::{Page, Pageable};
use super::store::ProductStore;

#[derive(Debug, Default)]
struct Inner {
    last_id: u64,
    products: BTreeMap<ProductId, Product>,
}

/// Keeps products in a map ordered by id. Ids start at 1 and are never
/// reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(
        &self,
        pageable: Pageable,
        predicate: impl Fn(&Product) -> bool + Send,
    ) -> anyhow::Result<Page<Product>> {
        let inner = self.inner.read().await;
        let matches = inner
            .products
            .values()
            .filter(|product| predicate(*product))
            .cloned()
            .collect();
        Ok(Page::from_matches(matches, pageable))
    }
}

fn name_contains(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, input: ProductInput) -> anyhow::Result<Product> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let product = input.into_product(ProductId(inner.last_id));
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn save(&self, product: Product) -> anyhow::Result<Product> {
        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(product.id.0);
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> anyhow::Result<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: ProductId) -> anyhow::Result<()> {
        self.inner.write().await.products.remove(&id);
        Ok(())
    }

    async fn find_all(&self, pageable: Pageable) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |_| true).await
    }

    async fn find_by_name_contains(
        &self,
        name: &str,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| name_contains(p, name)).await
    }

    async fn find_by_price_between(
        &self,
        min: Decimal,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| p.price >= min && p.price <= max)
            .await
    }

    async fn find_by_price_greater_or_equal(
        &self,
        min: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| p.price >= min).await
    }

    async fn find_by_price_less_or_equal(
        &self,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| p.price <= max).await
    }

    async fn find_by_name_contains_and_price_between(
        &self,
        name: &str,
        min: Decimal,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| {
            name_contains(p, name) && p.price >= min && p.price <= max
        })
        .await
    }

    async fn find_by_name_contains_and_price_greater_or_equal(
        &self,
        name: &str,
        min: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| name_contains(p, name) && p.price >= min)
            .await
    }

    async fn find_by_name_contains_and_price_less_or_equal(
        &self,
        name: &str,
        max: Decimal,
        pageable: Pageable,
    ) -> anyhow::Result<Page<Product>> {
        self.select(pageable, |p| name_contains(p, name) && p.price <= max)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::products::page::PageRequest;

    fn input(name: &str, price: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: price.parse().unwrap(),
            description: None,
            image_url: None,
        }
    }

    fn names(page: &Page<Product>) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    async fn seeded() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        for (name, price) in [
            ("Widget", "9.99"),
            ("Gadget", "25.00"),
            ("Mega Widget", "49.50"),
            ("Sprocket", "5"),
        ] {
            store.insert(input(name, price)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryProductStore::new();
        let first = store.insert(input("Widget", "1")).await.unwrap();
        let second = store.insert(input("Gadget", "2")).await.unwrap();

        assert_eq!(first.id, ProductId(1));
        assert_eq!(second.id, ProductId(2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryProductStore::new();
        let first = store.insert(input("Widget", "1")).await.unwrap();
        store.delete_by_id(first.id).await.unwrap();

        let next = store.insert(input("Gadget", "2")).await.unwrap();
        assert_eq!(next.id, ProductId(2));
        assert!(store.find_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn name_match_ignores_case() {
        let store = seeded().await;
        let page = store
            .find_by_name_contains("WIDG", Pageable::Unpaged)
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Widget", "Mega Widget"]);
    }

    #[tokio::test]
    async fn price_bounds_are_inclusive() {
        let store = seeded().await;

        let between = store
            .find_by_price_between("5".parse().unwrap(), "25".parse().unwrap(), Pageable::Unpaged)
            .await
            .unwrap();
        assert_eq!(names(&between), vec!["Widget", "Gadget", "Sprocket"]);

        let at_least = store
            .find_by_price_greater_or_equal("25.00".parse().unwrap(), Pageable::Unpaged)
            .await
            .unwrap();
        assert_eq!(names(&at_least), vec!["Gadget", "Mega Widget"]);

        let at_most = store
            .find_by_price_less_or_equal("9.99".parse().unwrap(), Pageable::Unpaged)
            .await
            .unwrap();
        assert_eq!(names(&at_most), vec!["Widget", "Sprocket"]);
    }

    #[tokio::test]
    async fn compound_queries_combine_name_and_price() {
        let store = seeded().await;

        let page = store
            .find_by_name_contains_and_price_greater_or_equal(
                "widget",
                "10".parse().unwrap(),
                Pageable::Unpaged,
            )
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Mega Widget"]);

        let page = store
            .find_by_name_contains_and_price_less_or_equal(
                "widget",
                "10".parse().unwrap(),
                Pageable::Unpaged,
            )
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Widget"]);
    }

    #[tokio::test]
    async fn paged_queries_report_total_matches() {
        let store = seeded().await;
        let request = PageRequest::new(1, 1).unwrap();

        let page = store
            .find_by_name_contains("widget", request.into())
            .await
            .unwrap();

        assert_eq!(names(&page), vec!["Mega Widget"]);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn save_replaces_the_stored_version() {
        let store = seeded().await;
        let mut product = store.find_by_id(ProductId(2)).await.unwrap().unwrap();
        product.name = "Gizmo".to_string();

        store.save(product.clone()).await.unwrap();

        assert_eq!(store.find_by_id(ProductId(2)).await.unwrap(), Some(product));
        let all = store.find_all(Pageable::Unpaged).await.unwrap();
        assert_eq!(all.total_elements, 4);
    }
}
