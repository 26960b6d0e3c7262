// =============================================================================
// FILTER ENGINE
// =============================================================================
// Search / category / status predicates plus page slicing over an in-memory
// collection. This is the in-memory counterpart of a
// `WHERE ... LIMIT $1 OFFSET $2` query with a separate COUNT(*).
//
// Rules:
// - search: case-insensitive substring of the record's searchable fields
// - category / status: exact equality, only when the option is set
// - predicates are ANDed; `total` counts matches before slicing
// - slicing happens only when both page and limit are set and non-zero;
//   a page past the end is empty, never an error
// - output keeps input order
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{Equipment, Material, Report, User};

// -----------------------------------------------------------------------------
// QUERY PARAMETERS
// -----------------------------------------------------------------------------
/// Options accepted by every list query
///
/// # Example
/// GET /api/v1/equipment?search=ak&status=active&page=1&limit=10
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

// Builders for tests; requests arrive through serde
#[cfg(test)]
impl FilterOptions {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Treat an empty string the same as an absent option
fn set(option: &Option<String>) -> Option<&str> {
    option.as_deref().filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// -----------------------------------------------------------------------------
// FILTERABLE RECORDS
// -----------------------------------------------------------------------------
/// A record the filter engine can match against.
///
/// Records without a category or status return `None`; such records never
/// satisfy a category or status predicate once it is set.
pub trait Filterable {
    fn name(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    fn status(&self) -> Option<&str> {
        None
    }

    /// `needle` is already lower-cased
    fn matches_search(&self, needle: &str) -> bool {
        contains_ignore_case(self.name(), needle)
            || self
                .category()
                .is_some_and(|category| contains_ignore_case(category, needle))
    }
}

impl Filterable for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Filterable for Equipment {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Filterable for Material {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }
}

// Reports are searched by title and type and have no category.
impl Filterable for Report {
    fn name(&self) -> &str {
        &self.title
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ignore_case(&self.title, needle) || contains_ignore_case(self.kind.as_str(), needle)
    }
}

// -----------------------------------------------------------------------------
// FILTER + PAGINATE
// -----------------------------------------------------------------------------
/// Matched page plus the number of matches before slicing
#[derive(Debug, Clone, PartialEq)]
pub struct Filtered<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Apply `options` to `items`, cloning only the records on the returned page
pub fn apply_filters<T>(items: &[T], options: &FilterOptions) -> Filtered<T>
where
    T: Filterable + Clone,
{
    let needle = set(&options.search).map(str::to_lowercase);
    let category = set(&options.category);
    let status = set(&options.status);

    let matched: Vec<&T> = items
        .iter()
        .filter(|item| needle.as_deref().map_or(true, |n| item.matches_search(n)))
        .filter(|item| category.map_or(true, |c| item.category() == Some(c)))
        .filter(|item| status.map_or(true, |s| item.status() == Some(s)))
        .collect();

    let total = matched.len();

    let items = match (options.page, options.limit) {
        (Some(page), Some(limit)) if page > 0 && limit > 0 => {
            // Page 1 = offset 0, Page 2 = offset limit, etc.
            let offset = (page - 1).saturating_mul(limit);
            matched
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect()
        }
        _ => matched.into_iter().cloned().collect(),
    };

    Filtered { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        category: Option<String>,
        status: Option<String>,
    }

    impl Filterable for Item {
        fn name(&self) -> &str {
            &self.name
        }

        fn category(&self) -> Option<&str> {
            self.category.as_deref()
        }

        fn status(&self) -> Option<&str> {
            self.status.as_deref()
        }
    }

    fn item(name: &str, category: Option<&str>, status: Option<&str>) -> Item {
        Item {
            name: name.to_string(),
            category: category.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    fn sample() -> Vec<Item> {
        vec![
            item("Súng trường AK-74", Some("Vũ khí cá nhân"), Some("active")),
            item("Xe tải KAMAZ", Some("Phương tiện vận tải"), Some("maintenance")),
            item("Bộ đàm Harris", Some("Thiết bị thông tin"), Some("active")),
            item("Áo giáp", None, None),
        ]
    }

    #[test]
    fn test_no_options_returns_everything() {
        let items = sample();
        let result = apply_filters(&items, &FilterOptions::default());
        assert_eq!(result.items, items);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let items = sample();

        let by_name = apply_filters(&items, &FilterOptions::default().search("kamaz"));
        assert_eq!(by_name.total, 1);
        assert_eq!(by_name.items[0].name, "Xe tải KAMAZ");

        let by_category = apply_filters(&items, &FilterOptions::default().search("THÔNG TIN"));
        assert_eq!(by_category.total, 1);
        assert_eq!(by_category.items[0].name, "Bộ đàm Harris");
    }

    #[test]
    fn test_predicates_are_anded() {
        let items = sample();
        let options = FilterOptions::default().search("a").status("active");
        let result = apply_filters(&items, &options);

        assert!(result.items.iter().all(|i| i.status.as_deref() == Some("active")));
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_missing_field_never_matches_set_predicate() {
        let items = sample();
        let result = apply_filters(&items, &FilterOptions::default().category("Áo giáp"));
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let items = sample();
        let options = FilterOptions::default().search("").status("");
        assert_eq!(apply_filters(&items, &options).total, 4);
    }

    #[test]
    fn test_pagination_counts_before_slicing() {
        let items = sample();

        let second = apply_filters(&items, &FilterOptions::default().page(2, 3));
        assert_eq!(second.total, 4);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].name, "Áo giáp");

        let beyond = apply_filters(&items, &FilterOptions::default().page(9, 3));
        assert_eq!(beyond.total, 4);
        assert!(beyond.items.is_empty());
    }

    #[test]
    fn test_page_without_limit_is_not_sliced() {
        let items = sample();
        let options = FilterOptions {
            page: Some(2),
            ..FilterOptions::default()
        };
        assert_eq!(apply_filters(&items, &options).items.len(), 4);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            "[a-zA-Z ]{0,12}",
            proptest::option::of("[a-z]{1,6}"),
            proptest::option::of(prop_oneof![Just("active"), Just("retired")]),
        )
            .prop_map(|(name, category, status)| Item {
                name,
                category,
                status: status.map(str::to_string),
            })
    }

    proptest! {
        #[test]
        fn prop_search_results_all_contain_term(
            items in proptest::collection::vec(arb_item(), 0..40),
            term in "[a-zA-Z]{1,3}",
        ) {
            let result = apply_filters(&items, &FilterOptions::default().search(term.clone()));
            let needle = term.to_lowercase();

            for found in &result.items {
                prop_assert!(found.matches_search(&needle));
            }
            let expected = items.iter().filter(|i| i.matches_search(&needle)).count();
            prop_assert_eq!(result.total, expected);
            prop_assert_eq!(result.items.len(), expected);
        }

        #[test]
        fn prop_page_length(
            items in proptest::collection::vec(arb_item(), 0..40),
            page in 1usize..10,
            limit in 1usize..10,
        ) {
            let result = apply_filters(&items, &FilterOptions::default().page(page, limit));
            let remaining = result.total.saturating_sub((page - 1) * limit);

            prop_assert_eq!(result.total, items.len());
            prop_assert_eq!(result.items.len(), remaining.min(limit));
        }
    }
}
