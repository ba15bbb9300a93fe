//! The inventory aggregate: gated CRUD and search over an owned item map.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use rust_decimal::Decimal;

use stockroom_auth::{authorize, Permission, Session};
use stockroom_core::{DomainError, DomainResult, ItemId};

use crate::item::{Item, ItemPatch, ItemStatus};
use crate::query::SearchFilters;

/// Criteria-based lookup for [`Inventory::find`]. All fields optional and
/// AND-combined.
///
/// Category here is an **exact** match; the free-text search path uses a
/// substring match instead. Both behaviors are kept as modeled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindCriteria {
    pub name: Option<String>,
    pub status: Option<ItemStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_quantity: Option<u32>,
    pub max_quantity: Option<u32>,
    pub category: Option<String>,
}

/// Aggregate root owning the item registry.
///
/// Items are exclusively owned here; every operation authorizes the supplied
/// session first and performs no side effect on denial. Listing and search
/// iterate in insertion order.
#[derive(Debug, Default)]
pub struct Inventory {
    items: HashMap<ItemId, Item>,
    // Insertion order of live ids; kept in sync with `items` on add/delete.
    order: Vec<ItemId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a new item. Requires `AddItem`.
    pub fn add_item(&mut self, session: Option<&Session>, item: Item) -> DomainResult<()> {
        authorize(session, Permission::AddItem)?;

        if self.items.contains_key(item.id()) {
            return Err(DomainError::duplicate_key(item.id().as_str()));
        }
        tracing::info!(item = %item.id(), name = item.name(), "item added");
        self.order.push(item.id().clone());
        self.items.insert(item.id().clone(), item);
        Ok(())
    }

    /// Apply a partial update to an existing item. Requires `EditItem`.
    ///
    /// Status follows the lifecycle rules: explicit status in the patch wins,
    /// otherwise it is recomputed from the updated quantity.
    pub fn edit_item(
        &mut self,
        session: Option<&Session>,
        id: &ItemId,
        patch: ItemPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<&Item> {
        authorize(session, Permission::EditItem)?;

        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        item.apply(patch, now);
        tracing::info!(item = %id, status = %item.status(), "item updated");
        Ok(item)
    }

    /// Remove an item, returning it. Requires `DeleteItem`.
    pub fn delete_item(&mut self, session: Option<&Session>, id: &ItemId) -> DomainResult<Item> {
        authorize(session, Permission::DeleteItem)?;

        let item = self
            .items
            .remove(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        self.order.retain(|held| held != id);
        tracing::info!(item = %id, "item deleted");
        Ok(item)
    }

    /// All items in insertion order. Requires `ViewItem`.
    pub fn list(&self, session: Option<&Session>) -> DomainResult<Vec<&Item>> {
        authorize(session, Permission::ViewItem)?;
        Ok(self.iter().collect())
    }

    /// Single-item read. Requires `ViewItem`.
    pub fn get(&self, session: Option<&Session>, id: &ItemId) -> DomainResult<&Item> {
        authorize(session, Permission::ViewItem)?;
        self.items
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    /// Criteria-based lookup. Requires `ViewItem`.
    pub fn find(
        &self,
        session: Option<&Session>,
        criteria: &FindCriteria,
    ) -> DomainResult<Vec<&Item>> {
        authorize(session, Permission::ViewItem)?;

        Ok(self
            .iter()
            .filter(|item| Self::satisfies(item, criteria))
            .collect())
    }

    /// Free-text search: translate the query, then evaluate the filters.
    /// Requires `ViewItem`.
    pub fn search(&self, session: Option<&Session>, query: &str) -> DomainResult<Vec<&Item>> {
        authorize(session, Permission::ViewItem)?;

        let filters = SearchFilters::parse(query);
        Ok(self.apply_filters(&filters))
    }

    /// Evaluate an already-built filter set, in insertion order.
    pub fn apply_filters(&self, filters: &SearchFilters) -> Vec<&Item> {
        self.iter().filter(|item| filters.matches(item)).collect()
    }

    fn iter(&self) -> impl Iterator<Item = &Item> {
        // `order` only holds live ids, so the lookup cannot miss.
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    fn satisfies(item: &Item, criteria: &FindCriteria) -> bool {
        if criteria
            .name
            .as_deref()
            .is_some_and(|name| !item.name().to_lowercase().contains(&name.to_lowercase()))
        {
            return false;
        }
        if criteria.status.is_some_and(|status| item.status() != status) {
            return false;
        }
        if criteria.min_price.is_some_and(|min| item.price() < min) {
            return false;
        }
        if criteria.max_price.is_some_and(|max| item.price() > max) {
            return false;
        }
        if criteria
            .min_quantity
            .is_some_and(|min| item.quantity() < min)
        {
            return false;
        }
        if criteria
            .max_quantity
            .is_some_and(|max| item.quantity() > max)
        {
            return false;
        }
        if criteria
            .category
            .as_deref()
            .is_some_and(|category| item.category() != category)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_auth::Role;
    use stockroom_core::Username;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn session(role: Role) -> Session {
        Session::new(Username::new("tester"), role)
    }

    fn item(id: &str, price: i64, quantity: u32, category: &str) -> Item {
        Item::new(
            ItemId::new(id),
            format!("{id} name"),
            quantity,
            dec(price),
            category,
            Utc::now(),
        )
    }

    fn stocked(role: Role) -> (Inventory, Session) {
        let admin = session(Role::Admin);
        let mut inventory = Inventory::new();
        inventory.add_item(Some(&admin), item("a", 30, 9, "tools")).unwrap();
        inventory.add_item(Some(&admin), item("b", 60, 9, "tools")).unwrap();
        inventory.add_item(Some(&admin), item("c", 20, 2, "garden")).unwrap();
        (inventory, session(role))
    }

    #[test]
    fn no_session_denies_every_operation_without_side_effects() {
        let (mut inventory, _) = stocked(Role::Admin);
        let before = inventory.len();

        assert_eq!(
            inventory.add_item(None, item("d", 1, 1, "x")),
            Err(DomainError::NoActiveSession)
        );
        assert_eq!(
            inventory.edit_item(None, &ItemId::new("a"), ItemPatch::default(), Utc::now()),
            Err(DomainError::NoActiveSession)
        );
        assert_eq!(
            inventory.delete_item(None, &ItemId::new("a")),
            Err(DomainError::NoActiveSession)
        );
        assert_eq!(inventory.list(None), Err(DomainError::NoActiveSession));
        assert_eq!(
            inventory.find(None, &FindCriteria::default()),
            Err(DomainError::NoActiveSession)
        );
        assert_eq!(
            inventory.search(None, "anything"),
            Err(DomainError::NoActiveSession)
        );

        assert_eq!(inventory.len(), before);
    }

    #[test]
    fn insufficient_role_denies_mutation_without_side_effects() {
        let (mut inventory, viewer) = stocked(Role::User);
        let before = inventory.len();

        let err = inventory
            .add_item(Some(&viewer), item("d", 1, 1, "x"))
            .unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied { .. }));

        let err = inventory
            .delete_item(Some(&viewer), &ItemId::new("a"))
            .unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied { .. }));

        assert_eq!(inventory.len(), before);
        // Reads are still granted to the viewer role.
        assert_eq!(inventory.list(Some(&viewer)).unwrap().len(), before);
    }

    #[test]
    fn manager_cannot_delete_but_can_edit() {
        let (mut inventory, manager) = stocked(Role::Manager);

        assert!(matches!(
            inventory
                .delete_item(Some(&manager), &ItemId::new("a"))
                .unwrap_err(),
            DomainError::PermissionDenied { .. }
        ));

        let updated = inventory
            .edit_item(
                Some(&manager),
                &ItemId::new("a"),
                ItemPatch {
                    quantity: Some(0),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert_eq!(updated.status(), ItemStatus::Ordered);
    }

    #[test]
    fn add_rejects_duplicate_id() {
        let (mut inventory, admin) = stocked(Role::Admin);
        let err = inventory
            .add_item(Some(&admin), item("a", 5, 5, "tools"))
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_key("a"));
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn edit_and_delete_unknown_id_report_not_found() {
        let (mut inventory, admin) = stocked(Role::Admin);
        assert_eq!(
            inventory
                .edit_item(Some(&admin), &ItemId::new("zz"), ItemPatch::default(), Utc::now())
                .unwrap_err(),
            DomainError::not_found("zz")
        );
        assert_eq!(
            inventory.delete_item(Some(&admin), &ItemId::new("zz")).unwrap_err(),
            DomainError::not_found("zz")
        );
    }

    #[test]
    fn add_then_find_round_trip() {
        let (inventory, admin) = stocked(Role::Admin);
        let found = inventory
            .find(
                Some(&admin),
                &FindCriteria {
                    category: Some("garden".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id().as_str(), "c");
    }

    #[test]
    fn delete_then_find_returns_empty() {
        let (mut inventory, admin) = stocked(Role::Admin);
        inventory.delete_item(Some(&admin), &ItemId::new("c")).unwrap();
        let found = inventory
            .find(
                Some(&admin),
                &FindCriteria {
                    category: Some("garden".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn find_category_is_exact_match() {
        let (inventory, admin) = stocked(Role::Admin);
        let found = inventory
            .find(
                Some(&admin),
                &FindCriteria {
                    category: Some("tool".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        // "tool" != "tools": exact on this path, substring on search.
        assert!(found.is_empty());

        let via_search = inventory.search(Some(&admin), "category tool").unwrap();
        assert_eq!(via_search.len(), 2);
    }

    #[test]
    fn find_name_and_quantity_bounds() {
        let (inventory, admin) = stocked(Role::Admin);
        let found = inventory
            .find(
                Some(&admin),
                &FindCriteria {
                    name: Some("C NAME".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(found.len(), 1);

        let low = inventory
            .find(
                Some(&admin),
                &FindCriteria {
                    max_quantity: Some(4),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id().as_str(), "c");
    }

    #[test]
    fn search_under_fifty_in_stock_yields_only_the_cheap_stocked_item() {
        // Items: a = {30, InStock}, b = {60, InStock}, c = {20, LowStock}.
        let (inventory, viewer) = stocked(Role::User);
        let results = inventory
            .search(Some(&viewer), "show items under $50 in stock")
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id().as_str(), "a");
    }

    #[test]
    fn full_session_flow_through_user_manager() {
        let mut users = stockroom_auth::UserManager::new();
        users
            .register(Username::new("alice"), "pw", Role::Admin, Utc::now())
            .unwrap();
        let mut inventory = Inventory::new();

        // Not logged in yet: fail closed.
        assert_eq!(
            inventory.add_item(users.session().as_ref(), item("a", 30, 9, "tools")),
            Err(DomainError::NoActiveSession)
        );

        users.login(&Username::new("alice"), "pw").unwrap();
        inventory
            .add_item(users.session().as_ref(), item("a", 30, 9, "tools"))
            .unwrap();
        let hits = inventory
            .search(users.session().as_ref(), "under 50")
            .unwrap();
        assert_eq!(hits.len(), 1);

        users.logout().unwrap();
        assert_eq!(
            inventory.list(users.session().as_ref()),
            Err(DomainError::NoActiveSession)
        );
    }

    #[test]
    fn list_and_search_keep_insertion_order() {
        let (mut inventory, admin) = stocked(Role::Admin);
        inventory.delete_item(Some(&admin), &ItemId::new("b")).unwrap();
        inventory
            .add_item(Some(&admin), item("d", 10, 9, "tools"))
            .unwrap();

        let ids: Vec<_> = inventory
            .list(Some(&admin))
            .unwrap()
            .iter()
            .map(|item| item.id().as_str().to_string())
            .collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }
}
