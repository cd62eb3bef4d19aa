//! Translation of listing parameters into a store query.

use serde::Deserialize;

use super::error::ToolError;
use crate::core::store::{Filter, FindQuery, Sort};

/// Fields searched by the free-text `search` parameter.
const SEARCH_FIELDS: [&str; 3] = ["name", "description", "tags"];

/// Query string of `GET /tools`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolListParams {
    /// Case-insensitive substring matched against name, description or tags.
    pub search: Option<String>,

    /// Exact category.
    pub category: Option<String>,

    /// Exact price label.
    pub price: Option<String>,

    /// Inclusive minimum rating, parsed as a float.
    pub rating: Option<String>,

    /// One of `name`, `rating`, `newest`, `popular`.
    pub sort: Option<String>,
}

/// Orderings offered by the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolSort {
    #[default]
    Name,
    Rating,
    Newest,
    Popular,
}

impl ToolSort {
    /// Interpret the `sort` parameter; anything unrecognised means `Name`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("rating") => Self::Rating,
            Some("newest") => Self::Newest,
            Some("popular") => Self::Popular,
            _ => Self::Name,
        }
    }

    /// The store sort this ordering stands for.
    pub fn to_sort(self) -> Sort {
        match self {
            Self::Name => Sort::ascending("name"),
            Self::Rating => Sort::descending("rating"),
            Self::Newest => Sort::descending("releaseDate"),
            Self::Popular => Sort::descending("popularityScore"),
        }
    }
}

impl ToolListParams {
    /// Build the store query. Supplied filters are combined with AND.
    pub fn to_query(&self) -> Result<FindQuery, ToolError> {
        let mut query = FindQuery::all();

        if let Some(search) = &self.search {
            query = query.filter(Filter::or(
                SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::contains_ignore_case(*field, search.as_str()))
                    .collect(),
            ));
        }

        if let Some(category) = &self.category {
            query = query.filter(Filter::eq("category", category.as_str()));
        }

        if let Some(price) = &self.price {
            query = query.filter(Filter::eq("price", price.as_str()));
        }

        if let Some(rating) = &self.rating {
            let min = rating
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ToolError::invalid_filter("rating", rating))?;
            query = query.filter(Filter::gte("rating", min));
        }

        Ok(query.sort(ToolSort::from_param(self.sort.as_deref()).to_sort()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::SortDirection;

    #[test]
    fn test_sort_mapping() {
        assert_eq!(ToolSort::from_param(None), ToolSort::Name);
        assert_eq!(ToolSort::from_param(Some("rating")), ToolSort::Rating);
        assert_eq!(ToolSort::from_param(Some("newest")), ToolSort::Newest);
        assert_eq!(ToolSort::from_param(Some("popular")), ToolSort::Popular);
        assert_eq!(ToolSort::from_param(Some("RATING")), ToolSort::Name);
        assert_eq!(ToolSort::from_param(Some("bogus")), ToolSort::Name);

        let sort = ToolSort::Newest.to_sort();
        assert_eq!(sort.field, "releaseDate");
        assert_eq!(sort.direction, SortDirection::Descending);

        let sort = ToolSort::Name.to_sort();
        assert_eq!(sort.field, "name");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_empty_params_list_everything_by_name() {
        let query = ToolListParams::default().to_query().unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.sort, Some(Sort::ascending("name")));
    }

    #[test]
    fn test_all_filters_combined() {
        let params = ToolListParams {
            search: Some("chat".to_string()),
            category: Some("Writing".to_string()),
            price: Some("free".to_string()),
            rating: Some("3.5".to_string()),
            sort: Some("popular".to_string()),
        };
        let query = params.to_query().unwrap();

        assert_eq!(query.filters.len(), 4);
        assert!(matches!(&query.filters[0], Filter::Or(branches) if branches.len() == 3));
        assert_eq!(query.filters[1], Filter::eq("category", "Writing"));
        assert_eq!(query.filters[2], Filter::eq("price", "free"));
        assert_eq!(query.filters[3], Filter::gte("rating", 3.5));
        assert_eq!(query.sort, Some(Sort::descending("popularityScore")));
    }

    #[test]
    fn test_invalid_rating_rejected() {
        for bad in ["high", "", "NaN", "inf"] {
            let params = ToolListParams {
                rating: Some(bad.to_string()),
                ..Default::default()
            };
            let err = params.to_query().unwrap_err();
            assert!(matches!(err, ToolError::InvalidFilter { param: "rating", .. }));
        }
    }
}
