use std::sync::Arc;

use thiserror::Error;

use super::filter::{FilterQuery, PriceBound, ProductFilter};
use super::models::{Product, ProductId, ProductInput};
use super::page::{Page, PageRequest, Pageable};
use super::store::ProductStore;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product with id {id} not found")]
    NotFound { id: ProductId },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Product use cases on top of a [`ProductStore`].
///
/// Stateless apart from the store handle. `update` and `delete` read then
/// write without a transaction, so concurrent writers to one id race and the
/// last write wins.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let product = self.store.insert(input).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    pub async fn find_by_id(&self, id: ProductId) -> ProductResult<Product> {
        tracing::debug!(product_id = %id, "loading product");
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound { id })
    }

    /// Replace every mutable field of an existing product.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> ProductResult<Product> {
        let mut product = self.find_by_id(id).await?;
        product.apply(input);
        let product = self.store.save(product).await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> ProductResult<()> {
        let product = self.find_by_id(id).await?;
        self.store.delete_by_id(product.id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.store.find_all(Pageable::Unpaged).await?.into_items())
    }

    /// Every product matching `filter`, in store order.
    pub async fn filter_and_list(&self, filter: &ProductFilter) -> ProductResult<Vec<Product>> {
        Ok(self.dispatch(filter, Pageable::Unpaged).await?.into_items())
    }

    pub async fn filter_and_list_paginated(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> ProductResult<Page<Product>> {
        self.dispatch(filter, request.into()).await
    }

    pub async fn list_all_paginated(&self, request: PageRequest) -> ProductResult<Page<Product>> {
        Ok(self.store.find_all(request.into()).await?)
    }

    async fn dispatch(
        &self,
        filter: &ProductFilter,
        pageable: Pageable,
    ) -> ProductResult<Page<Product>> {
        let query = filter.query();
        tracing::debug!(filter_kind = %query.kind(), ?pageable, "listing products");

        let store = &self.store;
        let page = match query {
            FilterQuery::NameMinMax { name, min, max } => {
                store
                    .find_by_name_contains_and_price_between(name, min, max, pageable)
                    .await?
            }
            FilterQuery::NameMin { name, min } => {
                store
                    .find_by_name_contains_and_price_greater_or_equal(name, min, pageable)
                    .await?
            }
            FilterQuery::NameMax { name, max } => {
                store
                    .find_by_name_contains_and_price_less_or_equal(name, max, pageable)
                    .await?
            }
            FilterQuery::NameOnly { name } => store.find_by_name_contains(name, pageable).await?,
            FilterQuery::MinMax(PriceBound::Between { min, max }) => {
                store.find_by_price_between(min, max, pageable).await?
            }
            FilterQuery::MinMax(PriceBound::AtLeast(min)) => {
                store.find_by_price_greater_or_equal(min, pageable).await?
            }
            FilterQuery::MinMax(PriceBound::AtMost(max)) => {
                store.find_by_price_less_or_equal(max, pageable).await?
            }
            FilterQuery::Unfiltered => store.find_all(pageable).await?,
        };

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::products::memory::MemoryProductStore;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    struct UnavailableStore;

    fn unavailable<T>() -> anyhow::Result<T> {
        Err(anyhow!("connection refused"))
    }

    #[async_trait]
    impl ProductStore for UnavailableStore {
        async fn insert(&self, _: ProductInput) -> anyhow::Result<Product> {
            unavailable()
        }

        async fn save(&self, _: Product) -> anyhow::Result<Product> {
            unavailable()
        }

        async fn find_by_id(&self, _: ProductId) -> anyhow::Result<Option<Product>> {
            unavailable()
        }

        async fn delete_by_id(&self, _: ProductId) -> anyhow::Result<()> {
            unavailable()
        }

        async fn find_all(&self, _: Pageable) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_name_contains(&self, _: &str, _: Pageable) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_price_between(
            &self,
            _: Decimal,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_price_greater_or_equal(
            &self,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_price_less_or_equal(
            &self,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_name_contains_and_price_between(
            &self,
            _: &str,
            _: Decimal,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_name_contains_and_price_greater_or_equal(
            &self,
            _: &str,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }

        async fn find_by_name_contains_and_price_less_or_equal(
            &self,
            _: &str,
            _: Decimal,
            _: Pageable,
        ) -> anyhow::Result<Page<Product>> {
            unavailable()
        }
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn input(name: &str, price: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: dec(price),
            description: Some(String::new()),
            image_url: Some(String::new()),
        }
    }

    fn filter(name: Option<&str>, min: Option<&str>, max: Option<&str>) -> ProductFilter {
        ProductFilter {
            name: name.map(str::to_string),
            min_price: min.map(dec),
            max_price: max.map(dec),
        }
    }

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductStore::new()))
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_then_find_returns_the_same_product() {
        let service = service();
        let created = service.create(input("Widget", "9.99")).await.unwrap();

        assert_eq!(created.id, ProductId(1));
        assert_eq!(service.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_overwrites_every_mutable_field() {
        let service = service();
        let created = service.create(input("Widget", "9.99")).await.unwrap();

        let replacement = ProductInput {
            name: "Widget Pro".to_string(),
            price: dec("19.99"),
            description: None,
            image_url: Some("https://img.example/widget.png".to_string()),
        };
        let updated = service
            .update(created.id, replacement.clone())
            .await
            .unwrap();

        assert_eq!(updated, replacement.clone().into_product(created.id));
        assert_eq!(
            service.find_by_id(created.id).await.unwrap(),
            replacement.into_product(created.id)
        );
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let err = service()
            .update(ProductId(42), input("Widget", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound { id } if id == ProductId(42)));
    }

    #[tokio::test]
    async fn delete_then_find_is_not_found() {
        let service = service();
        let created = service.create(input("Widget", "9.99")).await.unwrap();

        service.delete(created.id).await.unwrap();

        let err = service.find_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound { .. }));
        assert!(matches!(
            service.delete(created.id).await,
            Err(ProductError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn never_created_id_is_not_found() {
        let err = service().find_by_id(ProductId(7)).await.unwrap_err();
        assert_eq!(err.to_string(), "product with id 7 not found");
    }

    #[tokio::test]
    async fn filter_dispatch_matches_the_widget_example() {
        let service = service();
        service.create(input("Widget", "9.99")).await.unwrap();

        let found = service
            .filter_and_list(&filter(Some("wid"), Some("5"), Some("15")))
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Widget"]);

        let found = service
            .filter_and_list(&filter(Some("wid"), Some("20"), None))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn every_filter_shape_reaches_its_query() {
        let service = service();
        for (name, price) in [
            ("Widget", "9.99"),
            ("Gadget", "25"),
            ("Mega Widget", "49.50"),
            ("Sprocket", "5"),
        ] {
            service.create(input(name, price)).await.unwrap();
        }

        let cases = [
            (filter(Some("widget"), Some("5"), Some("40")), vec!["Widget"]),
            (filter(Some("widget"), Some("10"), None), vec!["Mega Widget"]),
            (filter(Some("widget"), None, Some("10")), vec!["Widget"]),
            (filter(Some("GADGET"), None, None), vec!["Gadget"]),
            (filter(None, Some("9.99"), Some("25")), vec!["Widget", "Gadget"]),
            (filter(None, Some("25"), None), vec!["Gadget", "Mega Widget"]),
            (filter(Some("  "), None, Some("9.99")), vec!["Widget", "Sprocket"]),
            (
                filter(None, None, None),
                vec!["Widget", "Gadget", "Mega Widget", "Sprocket"],
            ),
        ];

        for (filter, expected) in cases {
            let unpaged = service.filter_and_list(&filter).await.unwrap();
            assert_eq!(names(&unpaged), expected, "unpaged {filter:?}");

            let paged = service
                .filter_and_list_paginated(&filter, PageRequest::new(0, 10).unwrap())
                .await
                .unwrap();
            assert_eq!(names(&paged.items), expected, "paged {filter:?}");
            assert_eq!(paged.total_elements, expected.len() as u64);
        }
    }

    #[tokio::test]
    async fn one_sided_price_filter_has_no_upper_ceiling() {
        let service = service();
        service
            .create(input("Yacht", "1000000000000000000"))
            .await
            .unwrap();

        let page = service
            .filter_and_list_paginated(
                &filter(None, Some("1"), None),
                PageRequest::new(0, 10).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(names(&page.items), vec!["Yacht"]);
    }

    #[tokio::test]
    async fn list_all_paginated_splits_into_pages() {
        let service = service();
        for n in 0..25 {
            service
                .create(input(&format!("Product {n:02}"), "1"))
                .await
                .unwrap();
        }

        let first = service
            .list_all_paginated(PageRequest::new(0, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_elements, 25);
        assert_eq!(first.total_pages, 3);

        let last = service
            .list_all_paginated(PageRequest::new(2, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].name, "Product 20");

        assert_eq!(service.list_all().await.unwrap().len(), 25);
    }

    #[tokio::test]
    async fn storage_failures_propagate_unchanged() {
        let service = ProductService::new(Arc::new(UnavailableStore));

        let create = service.create(input("Widget", "9.99")).await.unwrap_err();
        let find = service.find_by_id(ProductId(1)).await.unwrap_err();
        let list = service
            .filter_and_list(&filter(Some("wid"), Some("5"), None))
            .await
            .unwrap_err();
        let page = service
            .list_all_paginated(PageRequest::new(0, 10).unwrap())
            .await
            .unwrap_err();

        for err in [create, find, list, page] {
            assert!(matches!(err, ProductError::Storage(_)), "{err:?}");
            assert_eq!(err.to_string(), "connection refused");
        }
    }
}
