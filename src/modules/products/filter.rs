//! Maps the optional listing filters onto the query shape the store runs.

use std::fmt;

use rust_decimal::Decimal;

/// Optional name / price filters of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn query(&self) -> FilterQuery<'_> {
        classify(self.name.as_deref(), self.min_price, self.max_price)
    }
}

/// The six query shapes a filter can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    NameMinMax,
    NameMin,
    NameMax,
    NameOnly,
    MinMax,
    Unfiltered,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::NameMinMax => "NAME_MIN_MAX",
            FilterKind::NameMin => "NAME_MIN",
            FilterKind::NameMax => "NAME_MAX",
            FilterKind::NameOnly => "NAME_ONLY",
            FilterKind::MinMax => "MIN_MAX",
            FilterKind::Unfiltered => "NONE",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price-only constraint; at least one side is always bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    Between { min: Decimal, max: Decimal },
    AtLeast(Decimal),
    AtMost(Decimal),
}

/// A classified filter carrying exactly the values its shape needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterQuery<'a> {
    NameMinMax {
        name: &'a str,
        min: Decimal,
        max: Decimal,
    },
    NameMin {
        name: &'a str,
        min: Decimal,
    },
    NameMax {
        name: &'a str,
        max: Decimal,
    },
    NameOnly {
        name: &'a str,
    },
    MinMax(PriceBound),
    Unfiltered,
}

impl FilterQuery<'_> {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterQuery::NameMinMax { .. } => FilterKind::NameMinMax,
            FilterQuery::NameMin { .. } => FilterKind::NameMin,
            FilterQuery::NameMax { .. } => FilterKind::NameMax,
            FilterQuery::NameOnly { .. } => FilterKind::NameOnly,
            FilterQuery::MinMax(_) => FilterKind::MinMax,
            FilterQuery::Unfiltered => FilterKind::Unfiltered,
        }
    }
}

/// Pick the query shape for a filter triple.
///
/// A name counts as present only when it has a non-whitespace character. The
/// name itself is passed through untrimmed.
pub fn classify(
    name: Option<&str>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
) -> FilterQuery<'_> {
    let name = name.filter(|n| !n.trim().is_empty());

    match (name, min_price, max_price) {
        (Some(name), Some(min), Some(max)) => FilterQuery::NameMinMax { name, min, max },
        (Some(name), Some(min), None) => FilterQuery::NameMin { name, min },
        (Some(name), None, Some(max)) => FilterQuery::NameMax { name, max },
        (Some(name), None, None) => FilterQuery::NameOnly { name },
        (None, Some(min), Some(max)) => FilterQuery::MinMax(PriceBound::Between { min, max }),
        (None, Some(min), None) => FilterQuery::MinMax(PriceBound::AtLeast(min)),
        (None, None, Some(max)) => FilterQuery::MinMax(PriceBound::AtMost(max)),
        (None, None, None) => FilterQuery::Unfiltered,
    }
}
