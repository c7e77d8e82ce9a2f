//! Context-scoped order store
//!
//! The same order listing serves three viewers — a buyer sees their own
//! orders, a vendor theirs, an admin everything — so the store re-targets
//! its fetches through a [`ViewScope`] set explicitly by the hosting page.
//!
//! Status values are opaque backend-owned strings. The transition helpers
//! below just send the string the fulfillment flow uses; they do not
//! validate transitions locally. Deletion is deliberately not part of this
//! surface: orders are never removed from the client.

use serde_json::json;
use std::sync::Arc;
use vitrine_core::{Clock, EntityId, ListQuery, Order, Result, ViewScope};
use vitrine_store::{EntityStore, StoreConfig, StoreSnapshot};
use vitrine_transport::EntityBackend;

/// Status string sent by the confirm helper
pub const STATUS_CONFIRMED: &str = "confirmed";
/// Status string sent by the ship helper
pub const STATUS_SHIPPED: &str = "shipped";

/// Order store with viewer-scope switching and fulfillment helpers
pub struct OrderStore {
    inner: EntityStore<Order>,
}

impl OrderStore {
    pub fn new(
        backend: Arc<dyn EntityBackend<Order>>,
        clock: Arc<dyn Clock>,
        config: StoreConfig,
    ) -> Self {
        OrderStore { inner: EntityStore::new("orders", backend, clock, config) }
    }

    // ========== Scope ==========

    /// Re-target the store at a viewer scope
    ///
    /// Dropping the old scope's records, selection, and cache comes with
    /// the switch; see [`EntityStore::set_scope`].
    pub fn view_as(&self, scope: ViewScope) {
        self.inner.set_scope(scope);
    }

    /// The active viewer scope
    pub fn scope(&self) -> ViewScope {
        self.inner.scope()
    }

    // ========== Fetching ==========

    /// Fetch the listing for the active scope, honouring the TTL cache
    pub async fn fetch(&self) -> Result<()> {
        self.inner.fetch().await
    }

    /// Fetch with an explicit query override
    pub async fn fetch_with(&self, query: ListQuery) -> Result<()> {
        self.inner.fetch_with(query).await
    }

    /// Fetch one order (detail view)
    pub async fn fetch_one(&self, id: &EntityId) -> Result<Order> {
        self.inner.fetch_one(id).await
    }

    // ========== Status transitions ==========

    /// Set one order's status (opaque string, passed through)
    pub async fn set_status(&self, id: &EntityId, status: &str) -> Result<Order> {
        self.inner.patch(id, json!({ "status": status })).await
    }

    /// Bulk status update over the selection (or an explicit id list)
    ///
    /// All-or-nothing: one failed order rejects the whole batch with
    /// nothing committed locally.
    pub async fn bulk_set_status(
        &self,
        ids: Option<Vec<EntityId>>,
        status: &str,
    ) -> Result<Vec<Order>> {
        self.inner.bulk_patch(ids, json!({ "status": status })).await
    }

    /// Confirm the selected orders
    pub async fn confirm(&self, ids: Option<Vec<EntityId>>) -> Result<Vec<Order>> {
        self.bulk_set_status(ids, STATUS_CONFIRMED).await
    }

    /// Mark the selected orders shipped
    pub async fn ship(&self, ids: Option<Vec<EntityId>>) -> Result<Vec<Order>> {
        self.bulk_set_status(ids, STATUS_SHIPPED).await
    }

    // ========== Selection ==========

    pub fn select(&self, ids: impl IntoIterator<Item = EntityId>) {
        self.inner.select(ids);
    }

    pub fn select_all(&self) {
        self.inner.select_all();
    }

    pub fn toggle(&self, id: EntityId) {
        self.inner.toggle(id);
    }

    pub fn clear_selection(&self) {
        self.inner.clear_selection();
    }

    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.inner.selected_ids()
    }

    // ========== Pagination ==========

    pub async fn go_to_page(&self, page: u32) -> Result<()> {
        self.inner.go_to_page(page).await
    }

    pub async fn next_page(&self) -> Result<bool> {
        self.inner.next_page().await
    }

    pub async fn previous_page(&self) -> Result<bool> {
        self.inner.previous_page().await
    }

    // ========== Reads ==========

    pub fn snapshot(&self) -> StoreSnapshot<Order> {
        self.inner.snapshot()
    }

    pub fn get(&self, id: &EntityId) -> Option<Order> {
        self.inner.get(id)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    /// Drop cached orders (page unmount)
    pub fn clear(&self) {
        self.inner.clear();
    }
}
