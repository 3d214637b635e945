//! Request checks run before anything reaches the product service.

use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_kernel::settings::CatalogSettings;

use super::filter::ProductFilter;
use super::models::{ProductInput, ProductRequest};
use super::page::PageRequest;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 2000;
const IMAGE_URL_MAX_CHARS: usize = 255;

/// One offending field and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_max_chars(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(value) = value {
        if value.chars().count() > max {
            errors.push(FieldError::new(
                field,
                format!("{field} must be at most {max} characters"),
            ));
        }
    }
}

impl ProductRequest {
    /// Check every constraint and collect all violations.
    pub fn validate(self) -> Result<ProductInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        match self.name.as_deref().map(str::trim) {
            None | Some("") => errors.push(FieldError::new("name", "name is required")),
            Some(trimmed) => {
                let length = trimmed.chars().count();
                if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
                    errors.push(FieldError::new(
                        "name",
                        format!(
                            "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
                        ),
                    ));
                }
            }
        }

        match self.price {
            None => errors.push(FieldError::new("price", "price is required")),
            Some(price) if price <= Decimal::ZERO => {
                errors.push(FieldError::new("price", "price must be greater than zero"))
            }
            Some(_) => {}
        }

        check_max_chars(
            &mut errors,
            "description",
            self.description.as_deref(),
            DESCRIPTION_MAX_CHARS,
        );
        check_max_chars(
            &mut errors,
            "image_url",
            self.image_url.as_deref(),
            IMAGE_URL_MAX_CHARS,
        );

        match (self.name, self.price) {
            (Some(name), Some(price)) if errors.is_empty() => Ok(ProductInput {
                name,
                price,
                description: self.description,
                image_url: self.image_url,
            }),
            _ => Err(errors),
        }
    }
}

/// Query string of the filtered listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            name: self.name.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }

    pub fn page_request(
        &self,
        settings: &CatalogSettings,
    ) -> Result<PageRequest, Vec<FieldError>> {
        page_request(self.page, self.size, settings)
    }
}

/// Query string of the unfiltered paginated listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn page_request(
        &self,
        settings: &CatalogSettings,
    ) -> Result<PageRequest, Vec<FieldError>> {
        page_request(self.page, self.size, settings)
    }
}

fn page_request(
    page: Option<u32>,
    size: Option<u32>,
    settings: &CatalogSettings,
) -> Result<PageRequest, Vec<FieldError>> {
    let size = size.unwrap_or(settings.default_page_size);
    if size > settings.max_page_size {
        return Err(vec![FieldError::new(
            "size",
            format!("size must be at most {}", settings.max_page_size),
        )]);
    }

    PageRequest::new(page.unwrap_or(0), size)
        .ok_or_else(|| vec![FieldError::new("size", "size must be at least 1")])
}
