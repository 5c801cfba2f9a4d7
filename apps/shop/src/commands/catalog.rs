//! # Catalog Commands
//!
//! Browsing the fixed product list and switching the category tab.

use serde::Serialize;
use tracing::debug;

use qrx_core::{CategoryFilter, Money, Product};
use qrx_export::SymbolRenderer;

use crate::error::ApiError;
use crate::state::SessionState;

/// Product row for display and `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.to_string(),
            name: p.name.to_string(),
            category: p.category.to_string(),
            price: p.price,
        }
    }
}

/// Parses a category name typed by the user (`all`, `apple`, ...).
pub fn parse_filter(input: &str) -> Result<CategoryFilter, ApiError> {
    input
        .parse::<CategoryFilter>()
        .map_err(|e| ApiError::validation(e.to_string()))
}

/// Lists the products visible under `filter`, or under the session's
/// current tab when no filter is given.
pub fn list_products<R: SymbolRenderer>(
    state: &SessionState<R>,
    filter: Option<&str>,
) -> Result<Vec<ProductDto>, ApiError> {
    let filter = match filter {
        Some(input) => parse_filter(input)?,
        None => state.session().filter(),
    };
    debug!(%filter, "list_products command");

    Ok(state.catalog().filter(filter).map(ProductDto::from).collect())
}

/// Switches the catalog tab.
pub fn set_filter<R: SymbolRenderer>(
    state: &mut SessionState<R>,
    input: &str,
) -> Result<CategoryFilter, ApiError> {
    let filter = parse_filter(input)?;
    debug!(%filter, "set_filter command");

    state.set_filter(filter);
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_list_uses_session_filter() {
        let mut state = SessionState::default();
        assert_eq!(list_products(&state, None).unwrap().len(), 10);

        set_filter(&mut state, "xiaomi").unwrap();
        let ids: Vec<String> = list_products(&state, None)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["X-001", "X-002", "X-003", "X-004"]);
    }

    #[test]
    fn test_explicit_filter_does_not_change_tab() {
        let state = SessionState::default();
        let apple = list_products(&state, Some("Apple")).unwrap();

        assert_eq!(apple.len(), 3);
        assert!(apple.iter().all(|p| p.category == "Apple"));
        assert_eq!(state.session().filter(), CategoryFilter::All);
    }

    #[test]
    fn test_unknown_category() {
        let mut state = SessionState::default();
        let err = set_filter(&mut state, "nokia").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.session().filter(), CategoryFilter::All);
    }
}
