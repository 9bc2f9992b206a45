// src/services/query_service.rs
//
// Read-only queries over a catalog snapshot: filtered, sorted, paginated
// search plus lightweight autocomplete. The pipeline order is fixed:
// keyword filter → date filter → sort → paginate.

use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Catalog, ProductRecord};
use crate::services::store::CatalogStore;

/// Autocomplete never returns more than this many suggestions
const AUTOCOMPLETE_LIMIT: usize = 10;

/// Keywords shorter than this yield an empty suggestion list
const AUTOCOMPLETE_MIN_KEYWORD: usize = 1;

/// Date window applied to the calendar date of `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Yesterday,
    LastWeek,
    Custom,
}

impl DateFilter {
    /// Unrecognized filter strings resolve to `None`, which skips the
    /// date stage entirely.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(DateFilter::Today),
            "yesterday" => Some(DateFilter::Yesterday),
            "last_week" => Some(DateFilter::LastWeek),
            "custom" => Some(DateFilter::Custom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub page: usize,
    pub per_page: usize,
    pub date_filter: Option<DateFilter>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort_order: SortOrder,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            page: 1,
            per_page: 20,
            date_filter: None,
            start_date: None,
            end_date: None,
            sort_order: SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchPage {
    pub items: Vec<ProductRecord>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

pub struct QueryService {
    store: Arc<CatalogStore>,
}

impl QueryService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    pub fn search(&self, params: &SearchParams) -> SearchPage {
        let catalog = self.store.snapshot();
        search_catalog(&catalog, params, Utc::now().date_naive())
    }

    pub fn autocomplete(&self, keyword: &str) -> Vec<String> {
        let catalog = self.store.snapshot();
        autocomplete_catalog(&catalog, keyword)
    }
}

/// The search pipeline, parameterized on "today" for the relative date
/// filters.
pub fn search_catalog(catalog: &Catalog, params: &SearchParams, today: NaiveDate) -> SearchPage {
    let keyword = params
        .keyword
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    let date_range = resolve_date_range(
        params.date_filter,
        params.start_date,
        params.end_date,
        today,
    );

    let mut matches: Vec<&ProductRecord> = catalog
        .records
        .iter()
        .filter(|r| keyword.is_empty() || matches_keyword(r, &keyword))
        .filter(|r| match date_range {
            Some((start, end)) => {
                let created = r.created_at.date_naive();
                created >= start && created <= end
            }
            None => true,
        })
        .collect();

    // Vec::sort_by is stable: equal timestamps keep their pre-sort order
    match params.sort_order {
        SortOrder::Desc => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Asc => matches.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }

    let total = matches.len();
    let per_page = params.per_page.max(1);
    let total_pages = total.div_ceil(per_page);

    let start = params.page.saturating_sub(1) * per_page;
    let items = if start >= total {
        Vec::new()
    } else {
        matches[start..(start + per_page).min(total)]
            .iter()
            .map(|r| (*r).clone())
            .collect()
    };

    SearchPage {
        items,
        total,
        page: params.page,
        total_pages,
    }
}

/// Case-insensitive substring match over the three searchable fields.
/// Empty fields never match.
fn matches_keyword(record: &ProductRecord, keyword: &str) -> bool {
    [
        &record.product_name,
        &record.product_code,
        &record.generated_title,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(keyword))
}

/// Resolve the filter kind to an inclusive `[start, end]` calendar range.
/// Custom with either bound missing skips the stage, not half of it.
fn resolve_date_range(
    filter: Option<DateFilter>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    match filter? {
        DateFilter::Today => Some((today, today)),
        DateFilter::Yesterday => {
            let yesterday = today - Duration::days(1);
            Some((yesterday, yesterday))
        }
        DateFilter::LastWeek => Some((today - Duration::days(7), today)),
        DateFilter::Custom => match (start_date, end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        },
    }
}

/// Collect up to ten distinct field values containing the keyword.
/// Deduplicated preserving first-seen order.
pub fn autocomplete_catalog(catalog: &Catalog, keyword: &str) -> Vec<String> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.chars().count() < AUTOCOMPLETE_MIN_KEYWORD {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    'records: for record in &catalog.records {
        for field in [
            &record.product_name,
            &record.product_code,
            &record.generated_title,
        ] {
            if field.to_lowercase().contains(&keyword) && seen.insert(field.clone()) {
                suggestions.push(field.clone());
                if suggestions.len() >= AUTOCOMPLETE_LIMIT {
                    break 'records;
                }
            }
        }
    }

    suggestions
}
