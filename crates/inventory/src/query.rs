//! Free-text query translation.
//!
//! Turns a search string like `"show items under $50 in stock"` into a
//! [`SearchFilters`] predicate set. This is a best-effort keyword/regex
//! matcher, not a grammar: extraction rules run independently over the
//! lowercased query, every match is kept, and the last assignment wins when
//! keywords collide.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemStatus};

static RE_UNDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"under\s?\$?(\d+)").expect("invalid 'under' pattern"));
static RE_OVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"over\s?\$?(\d+)").expect("invalid 'over' pattern"));
static RE_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"between\s?\$?(\d+)\s?and\s?\$?(\d+)").expect("invalid 'between' pattern")
});
static RE_CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"category\s+([a-zA-Z\s]+)").expect("invalid 'category' pattern"));

/// Status keywords, in fixed check order. A later keyword in this order
/// overwrites an earlier match when several appear in one query.
const STATUS_KEYWORDS: [(&str, ItemStatus); 4] = [
    ("in stock", ItemStatus::InStock),
    ("low stock", ItemStatus::LowStock),
    ("ordered", ItemStatus::Ordered),
    ("discontinued", ItemStatus::Discontinued),
];

/// Logical connective detected in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

/// Structured predicate set derived from free text.
///
/// `logical_conditions` records which connective words appeared but is not
/// consulted by evaluation: all active filters are AND-combined regardless.
/// Whether OR-combination was ever intended is an open question of the
/// modeled system; the extraction is kept so the gap stays visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub status: Option<ItemStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub category: Option<String>,
    pub logical_conditions: Vec<LogicalOp>,
}

impl SearchFilters {
    /// Extract filters from a free-text query.
    pub fn parse(query: &str) -> Self {
        let query = query.to_lowercase();
        let mut filters = SearchFilters::default();

        for (keyword, status) in STATUS_KEYWORDS {
            if query.contains(keyword) {
                filters.status = Some(status);
            }
        }

        if let Some(caps) = RE_UNDER.captures(&query) {
            filters.max_price = parse_amount(&caps[1]);
        }
        if let Some(caps) = RE_OVER.captures(&query) {
            filters.min_price = parse_amount(&caps[1]);
        }
        // Applied after under/over: a between-clause overwrites both bounds
        // whenever its pattern fires.
        if let Some(caps) = RE_BETWEEN.captures(&query) {
            filters.min_price = parse_amount(&caps[1]);
            filters.max_price = parse_amount(&caps[2]);
        }

        if let Some(caps) = RE_CATEGORY.captures(&query) {
            let category = caps[1].trim();
            if !category.is_empty() {
                filters.category = Some(category.to_string());
            }
        }

        // Substring presence anywhere in the query, checked and-then-or.
        // Note "ordered" itself contains "or"; that matches the modeled
        // behavior exactly.
        if query.contains("and") {
            filters.logical_conditions.push(LogicalOp::And);
        }
        if query.contains("or") {
            filters.logical_conditions.push(LogicalOp::Or);
        }

        tracing::debug!(?filters, "query translated");
        filters
    }

    /// Whether an item satisfies every active filter.
    ///
    /// Category here is a case-insensitive substring match (unlike the exact
    /// match on the criteria-based find path). `logical_conditions` is
    /// deliberately ignored.
    pub fn matches(&self, item: &Item) -> bool {
        if self.status.is_some_and(|status| item.status() != status) {
            return false;
        }
        if self
            .category
            .as_deref()
            .is_some_and(|category| !item.category().to_lowercase().contains(&category.to_lowercase()))
        {
            return false;
        }
        if self.min_price.is_some_and(|min| item.price() < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price() > max) {
            return false;
        }
        true
    }
}

/// Parse a digit-only capture into a decimal amount.
///
/// The patterns only capture digit runs, so this cannot see signs or
/// fractions; a run too long for `Decimal` drops the bound instead of
/// failing the whole query.
fn parse_amount(digits: &str) -> Option<Decimal> {
    digits.parse::<Decimal>().ok()
}
