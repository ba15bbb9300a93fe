//! Inventory items and the stock-status state machine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::ItemId;

/// Stock state of an item.
///
/// Derived from quantity unless explicitly overridden. `Discontinued` is the
/// one state derivation can never produce: it must be assigned explicitly,
/// and it survives only until the next update that leaves status to be
/// recomputed from quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    InStock,
    LowStock,
    Ordered,
    Discontinued,
}

/// Below this quantity (and above zero) an item counts as low stock.
const LOW_STOCK_THRESHOLD: u32 = 5;

impl ItemStatus {
    /// Derive the default status for a quantity.
    ///
    /// `0 → Ordered`, `1..=4 → LowStock`, `5.. → InStock`.
    pub fn for_quantity(quantity: u32) -> Self {
        if quantity == 0 {
            ItemStatus::Ordered
        } else if quantity < LOW_STOCK_THRESHOLD {
            ItemStatus::LowStock
        } else {
            ItemStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::InStock => "In Stock",
            ItemStatus::LowStock => "Low Stock",
            ItemStatus::Ordered => "Ordered",
            ItemStatus::Discontinued => "Discontinued",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = stockroom_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', " ").as_str() {
            "in stock" | "instock" => Ok(ItemStatus::InStock),
            "low stock" | "lowstock" => Ok(ItemStatus::LowStock),
            "ordered" => Ok(ItemStatus::Ordered),
            "discontinued" => Ok(ItemStatus::Discontinued),
            other => Err(stockroom_core::DomainError::validation(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

/// One inventory entry.
///
/// # Invariants
/// - `id` is the unique key, immutable after creation.
/// - `quantity` and `price` are non-negative by type.
/// - `status` is either the last explicitly assigned value or the derivation
///   of the current quantity; every update that omits a status recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    quantity: u32,
    price: Decimal,
    category: String,
    status: ItemStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update for [`Item::apply`]. Fields left `None` are untouched
/// (except `status`, whose absence triggers a recompute from quantity).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
}

impl Item {
    /// Create an item with its status derived from the quantity.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        quantity: u32,
        price: Decimal,
        category: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            price,
            category: category.into(),
            status: ItemStatus::for_quantity(quantity),
            created_at: now,
            updated_at: now,
        }
    }

    /// Override the status at construction (e.g. a discontinued listing).
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update.
    ///
    /// An explicit `status` in the patch wins outright (this is the only way
    /// to reach `Discontinued`). Otherwise status is recomputed from the
    /// possibly-just-updated quantity, which also means a previously assigned
    /// `Discontinued` is lost on the next status-less update.
    pub fn apply(&mut self, patch: ItemPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.status = match patch.status {
            Some(status) => status,
            None => ItemStatus::for_quantity(self.quantity),
        };
        self.updated_at = now;
    }
}
