//! The generic entity store
//!
//! One `EntityStore` per server-backed resource. It owns the normalized
//! collection, the active query and scope, the selection set, pagination
//! metadata, and the loading/error view state, and mediates every read and
//! write through the injected backend.
//!
//! ## Fetch coordination
//!
//! Every listing fetch draws a generation number from an atomic counter.
//! When the response arrives, it is committed only if no newer fetch has
//! been issued in the meantime: the last request *issued* wins, regardless
//! of the order in which responses resolve. A superseded response is
//! dropped silently.
//!
//! ## Failure semantics
//!
//! - A failed listing fetch records the error and empties the collection.
//! - A failed mutation records a separate mutation error and leaves the
//!   collection untouched (writes are confirm-then-apply).
//! - Bulk operations are all-or-nothing: one failure anywhere aborts the
//!   batch and nothing is committed locally.

use crate::collection::Collection;
use crate::freshness::Freshness;
use crate::selection::SelectionSet;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vitrine_core::{
    Clock, EntityId, Error, Keyed, ListQuery, PageInfo, Result, Timestamp, ViewScope,
};
use vitrine_transport::EntityBackend;

/// Per-store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a fetched page stays fresh (advisory)
    pub ttl: Duration,
    /// Default page size for new queries
    pub per_page: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            ttl: Duration::from_secs(60),
            per_page: vitrine_core::query::DEFAULT_PER_PAGE,
        }
    }
}

/// Point-in-time view of a store for rendering
///
/// Everything a view needs in one clone: records in server order, counts,
/// pagination flags, selection, the resolved detail record, and the
/// loading/error strings.
#[derive(Debug, Clone)]
pub struct StoreSnapshot<T> {
    /// Records of the current listing, in server order
    pub items: Vec<T>,
    /// Server-reported count across all pages
    pub total: u64,
    /// Pagination metadata of the current page
    pub page: PageInfo,
    /// Selected ids, sorted
    pub selected: Vec<EntityId>,
    /// The detail record, if one is set and still materialized
    pub detail: Option<T>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Display string of the last listing-fetch failure
    pub fetch_error: Option<String>,
    /// Display string of the last mutation failure
    pub mutation_error: Option<String>,
    /// The query the listing was produced by
    pub query: ListQuery,
}

struct State<T> {
    collection: Collection<T>,
    selection: SelectionSet,
    detail: Option<EntityId>,
    query: ListQuery,
    scope: ViewScope,
    page_info: PageInfo,
    freshness: Freshness,
    loading: bool,
    fetch_error: Option<String>,
    mutation_error: Option<String>,
}

/// Cached, fenced view-state store for one resource
pub struct EntityStore<T> {
    name: &'static str,
    backend: Arc<dyn EntityBackend<T>>,
    clock: Arc<dyn Clock>,
    state: Mutex<State<T>>,
    fetch_seq: AtomicU64,
}

impl<T> EntityStore<T>
where
    T: Keyed + Clone + Send + Sync,
{
    /// Construct a store over an injected backend and clock
    ///
    /// `name` labels tracing output only (e.g. `"products"`).
    pub fn new(
        name: &'static str,
        backend: Arc<dyn EntityBackend<T>>,
        clock: Arc<dyn Clock>,
        config: StoreConfig,
    ) -> Self {
        let mut query = ListQuery::default();
        query.per_page = config.per_page;
        EntityStore {
            name,
            backend,
            clock,
            state: Mutex::new(State {
                collection: Collection::new(),
                selection: SelectionSet::new(),
                detail: None,
                query,
                scope: ViewScope::Unscoped,
                page_info: PageInfo::empty(),
                freshness: Freshness::new(config.ttl),
                loading: false,
                fetch_error: None,
                mutation_error: None,
            }),
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ========== Fetching ==========

    /// Fetch the listing with the stored query, honouring the TTL cache
    ///
    /// Skips the backend entirely when the cached page is still fresh.
    pub async fn fetch(&self) -> Result<()> {
        let query = {
            let state = self.state.lock();
            if state.freshness.is_fresh(self.clock.now()) {
                tracing::debug!(store = self.name, "cache fresh, fetch skipped");
                return Ok(());
            }
            state.query.clone()
        };
        self.run_fetch(query).await
    }

    /// Fetch with an explicit query override, bypassing the TTL cache
    ///
    /// If the override changes the result set (filters, search, sort, or
    /// page size), pagination resets to page 1.
    pub async fn fetch_with(&self, query: ListQuery) -> Result<()> {
        let query = {
            let state = self.state.lock();
            if query.changes_result_set(&state.query) {
                query.at_page(1)
            } else {
                query
            }
        };
        self.run_fetch(query).await
    }

    async fn run_fetch(&self, query: ListQuery) -> Result<()> {
        let generation = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let scope = {
            let mut state = self.state.lock();
            state.loading = true;
            state.query = query.clone();
            state.scope.clone()
        };
        tracing::debug!(store = self.name, generation, page = query.page, "fetch issued");

        let outcome = self.backend.list(&scope, &query).await;

        let mut state = self.state.lock();
        if self.fetch_seq.load(Ordering::SeqCst) != generation {
            // A newer fetch owns the collection and the loading flag now.
            tracing::debug!(store = self.name, generation, "superseded fetch dropped");
            return Ok(());
        }
        state.loading = false;
        match outcome {
            Ok(page) => {
                tracing::debug!(
                    store = self.name,
                    records = page.records.len(),
                    total = page.info.total,
                    "fetch committed"
                );
                state.collection.replace(page.records, page.info.total);
                state.page_info = page.info;
                state.selection.clear();
                state.freshness.mark(self.clock.now());
                state.fetch_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(store = self.name, error = %err, "fetch failed, collection emptied");
                state.collection.clear();
                state.page_info = PageInfo::empty();
                state.selection.clear();
                state.freshness.invalidate();
                state.fetch_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch a single record and merge it into the collection
    ///
    /// A record not already listed is appended to the end of the listing;
    /// the server-reported total is not touched either way.
    pub async fn fetch_one(&self, id: &EntityId) -> Result<T> {
        let record = self.backend.get(id).await?;
        self.state.lock().collection.admit(record.clone());
        Ok(record)
    }

    // ========== Mutations (confirm-then-apply) ==========

    /// Create a record from a draft body
    ///
    /// On success the new record is prepended to the listing and the total
    /// grows by one. On failure the collection is untouched and a mutation
    /// error is recorded.
    pub async fn create(&self, draft: Value) -> Result<T> {
        match self.backend.create(draft).await {
            Ok(record) => {
                let mut state = self.state.lock();
                state.collection.prepend(record.clone());
                state.mutation_error = None;
                Ok(record)
            }
            Err(err) => {
                self.state.lock().mutation_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace a record wholesale
    pub async fn update(&self, id: &EntityId, body: Value) -> Result<T> {
        match self.backend.update(id, body).await {
            Ok(record) => {
                let mut state = self.state.lock();
                state.collection.upsert(record.clone());
                state.mutation_error = None;
                Ok(record)
            }
            Err(err) => {
                self.state.lock().mutation_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Apply a partial update to a record
    pub async fn patch(&self, id: &EntityId, body: Value) -> Result<T> {
        match self.backend.patch(id, body).await {
            Ok(record) => {
                let mut state = self.state.lock();
                state.collection.upsert(record.clone());
                state.mutation_error = None;
                Ok(record)
            }
            Err(err) => {
                self.state.lock().mutation_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a record
    ///
    /// On success the id disappears from the collection, the listing, the
    /// selection, and the detail slot; the total shrinks by one.
    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        match self.backend.delete(id).await {
            Ok(()) => {
                let mut state = self.state.lock();
                state.collection.remove(id);
                state.selection.deselect(id);
                if state.detail.as_ref() == Some(id) {
                    state.detail = None;
                }
                state.mutation_error = None;
                Ok(())
            }
            Err(err) => {
                self.state.lock().mutation_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // ========== Bulk operations (all-or-nothing) ==========

    /// Apply the same partial update to many records
    ///
    /// Targets the explicit id list, or the current selection when `ids`
    /// is `None`. One backend call per id; if any call fails the whole
    /// batch is rejected and no result is committed locally.
    pub async fn bulk_patch(&self, ids: Option<Vec<EntityId>>, body: Value) -> Result<Vec<T>> {
        let targets = self.bulk_targets(ids)?;
        let mut updated = Vec::with_capacity(targets.len());
        for id in &targets {
            match self.backend.patch(id, body.clone()).await {
                Ok(record) => updated.push(record),
                Err(err) => {
                    tracing::warn!(
                        store = self.name,
                        id = %id,
                        error = %err,
                        "bulk patch aborted, nothing committed"
                    );
                    self.state.lock().mutation_error = Some(err.to_string());
                    return Err(err);
                }
            }
        }
        let mut state = self.state.lock();
        for record in &updated {
            state.collection.upsert(record.clone());
        }
        state.mutation_error = None;
        Ok(updated)
    }

    /// Delete many records
    ///
    /// Same commit discipline as [`bulk_patch`](Self::bulk_patch): a
    /// failure anywhere leaves the local collection untouched.
    pub async fn bulk_delete(&self, ids: Option<Vec<EntityId>>) -> Result<usize> {
        let targets = self.bulk_targets(ids)?;
        for id in &targets {
            if let Err(err) = self.backend.delete(id).await {
                tracing::warn!(
                    store = self.name,
                    id = %id,
                    error = %err,
                    "bulk delete aborted, nothing committed"
                );
                self.state.lock().mutation_error = Some(err.to_string());
                return Err(err);
            }
        }
        let mut state = self.state.lock();
        for id in &targets {
            state.collection.remove(id);
            state.selection.deselect(id);
            if state.detail.as_ref() == Some(id) {
                state.detail = None;
            }
        }
        state.mutation_error = None;
        Ok(targets.len())
    }

    /// Resolve and validate the target ids of a bulk action
    fn bulk_targets(&self, ids: Option<Vec<EntityId>>) -> Result<Vec<EntityId>> {
        let state = self.state.lock();
        let targets = match ids {
            Some(ids) => ids,
            None => state.selection.ids(),
        };
        for id in &targets {
            if !state.collection.contains(id) {
                return Err(Error::Validation(format!(
                    "bulk action references unknown id: {id}"
                )));
            }
        }
        Ok(targets)
    }

    // ========== Selection ==========

    /// Add ids to the selection; ids not materialized locally are dropped
    pub fn select(&self, ids: impl IntoIterator<Item = EntityId>) {
        let mut state = self.state.lock();
        let known: Vec<EntityId> = ids
            .into_iter()
            .filter(|id| state.collection.contains(id))
            .collect();
        state.selection.select(known);
    }

    /// Select the entire current listing
    pub fn select_all(&self) {
        let mut state = self.state.lock();
        let all: Vec<EntityId> = state.collection.order().to_vec();
        state.selection.select(all);
    }

    /// Flip one id's selection; unknown ids are ignored
    pub fn toggle(&self, id: EntityId) {
        let mut state = self.state.lock();
        if state.collection.contains(&id) {
            state.selection.toggle(id);
        }
    }

    /// Empty the selection (idempotent)
    pub fn clear_selection(&self) {
        self.state.lock().selection.clear();
    }

    /// Selected ids, sorted
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.state.lock().selection.ids()
    }

    // ========== Detail slot ==========

    /// Point the detail view at a materialized record
    pub fn set_detail(&self, id: &EntityId) -> Result<()> {
        let mut state = self.state.lock();
        if !state.collection.contains(id) {
            return Err(Error::Validation(format!("detail id not materialized: {id}")));
        }
        state.detail = Some(id.clone());
        Ok(())
    }

    /// Clear the detail view
    pub fn clear_detail(&self) {
        self.state.lock().detail = None;
    }

    // ========== Pagination ==========

    /// Fetch a specific page (bypasses the TTL cache)
    pub async fn go_to_page(&self, page: u32) -> Result<()> {
        let query = self.state.lock().query.at_page(page);
        self.run_fetch(query).await
    }

    /// Fetch the next page; returns `false` without a call when there is none
    pub async fn next_page(&self) -> Result<bool> {
        let query = {
            let state = self.state.lock();
            if !state.page_info.has_next {
                return Ok(false);
            }
            state.query.at_page(state.query.page + 1)
        };
        self.run_fetch(query).await?;
        Ok(true)
    }

    /// Fetch the previous page; returns `false` without a call when on the first
    pub async fn previous_page(&self) -> Result<bool> {
        let query = {
            let state = self.state.lock();
            if !state.page_info.has_previous {
                return Ok(false);
            }
            state.query.at_page(state.query.page.saturating_sub(1))
        };
        self.run_fetch(query).await?;
        Ok(true)
    }

    // ========== Scope ==========

    /// Re-target the store at a different viewer scope
    ///
    /// A scope change is a different result set entirely: the collection is
    /// dropped, the selection cleared, pagination reset, and the cache
    /// invalidated. Setting the same scope again is a no-op.
    pub fn set_scope(&self, scope: ViewScope) {
        let mut state = self.state.lock();
        if state.scope == scope {
            return;
        }
        tracing::debug!(store = self.name, scope = %scope, "scope changed, cache dropped");
        state.scope = scope;
        state.query = state.query.at_page(1);
        state.collection.clear();
        state.selection.clear();
        state.detail = None;
        state.page_info = PageInfo::empty();
        state.freshness.invalidate();
        state.fetch_error = None;
    }

    /// The active viewer scope
    pub fn scope(&self) -> ViewScope {
        self.state.lock().scope.clone()
    }

    // ========== Reads ==========

    /// Point-in-time snapshot for rendering
    pub fn snapshot(&self) -> StoreSnapshot<T> {
        let state = self.state.lock();
        StoreSnapshot {
            items: state.collection.in_order().into_iter().cloned().collect(),
            total: state.collection.total(),
            page: state.page_info,
            selected: state.selection.ids(),
            detail: state
                .detail
                .as_ref()
                .and_then(|id| state.collection.get(id).cloned()),
            loading: state.loading,
            fetch_error: state.fetch_error.clone(),
            mutation_error: state.mutation_error.clone(),
            query: state.query.clone(),
        }
    }

    /// Look up one materialized record
    pub fn get(&self, id: &EntityId) -> Option<T> {
        self.state.lock().collection.get(id).cloned()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// When the listing was last fetched successfully
    pub fn last_fetch(&self) -> Option<Timestamp> {
        self.state.lock().freshness.last_fetch()
    }

    /// Drop all cached records and view state, keeping query and scope
    ///
    /// Collections never evict on their own; hosts call this when a page
    /// unmounts to cap memory growth.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.collection.clear();
        state.selection.clear();
        state.detail = None;
        state.page_info = PageInfo::empty();
        state.freshness.invalidate();
        state.fetch_error = None;
        state.mutation_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_core::{ManualClock, Product};
    use vitrine_transport::{CallKind, MemoryBackend};

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: EntityId::new(id).unwrap(),
            vendor_id: EntityId::new("v1").unwrap(),
            name: name.into(),
            price,
            stock: 1,
            status: "active".into(),
            created_at: Timestamp::EPOCH,
            updated_at: Timestamp::EPOCH,
        }
    }

    struct Fixture {
        backend: Arc<MemoryBackend<Product>>,
        clock: Arc<ManualClock>,
        store: EntityStore<Product>,
    }

    fn fixture(records: Vec<Product>) -> Fixture {
        let backend = Arc::new(MemoryBackend::seeded("prd_", records));
        let clock = Arc::new(ManualClock::at(Timestamp::from_secs(1_000)));
        let store = EntityStore::new(
            "products",
            backend.clone() as Arc<dyn EntityBackend<Product>>,
            clock.clone() as Arc<dyn Clock>,
            StoreConfig::default(),
        );
        Fixture { backend, clock, store }
    }

    fn id(s: &str) -> EntityId {
        EntityId::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_within_ttl_skips_network() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.fetch().await.unwrap();
        assert_eq!(f.backend.call_count(CallKind::List), 1);

        f.clock.advance(Duration::from_secs(61));
        f.store.fetch().await.unwrap();
        assert_eq!(f.backend.call_count(CallKind::List), 2);
    }

    #[tokio::test]
    async fn test_fetch_with_override_bypasses_ttl() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store
            .fetch_with(ListQuery::default().with_filter("status", "active"))
            .await
            .unwrap();
        assert_eq!(f.backend.call_count(CallKind::List), 2);
    }

    #[tokio::test]
    async fn test_override_changing_filters_resets_page() {
        let f = fixture((0..30).map(|i| product(&format!("p{i}"), "P", 100)).collect());
        f.store.fetch().await.unwrap();
        f.store.go_to_page(2).await.unwrap();
        assert_eq!(f.store.snapshot().page.page, 2);

        f.store
            .fetch_with(f.store.snapshot().query.with_filter("status", "active"))
            .await
            .unwrap();
        assert_eq!(f.store.snapshot().query.page, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_empties_collection_and_records_error() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        assert_eq!(f.store.snapshot().items.len(), 1);

        f.clock.advance(Duration::from_secs(120));
        f.backend.fail_next_transport(CallKind::List, None, "connection reset");
        assert!(f.store.fetch().await.is_err());

        let snap = f.store.snapshot();
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
        assert!(snap.fetch_error.as_deref().unwrap().contains("connection reset"));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn test_create_prepends_and_grows_total() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        let before = f.store.snapshot().total;

        let created = f.store
            .create(json!({
                "vendor_id": "v1",
                "name": "Hat",
                "price": 900,
                "stock": 2,
                "status": "draft",
                "created_at": 0,
                "updated_at": 0
            }))
            .await
            .unwrap();

        let snap = f.store.snapshot();
        assert_eq!(snap.total, before + 1);
        assert_eq!(snap.items[0].id, created.id);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_collection_untouched() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.backend.fail_next_api(CallKind::Create, None, 422, "bad draft");

        assert!(f.store.create(json!({})).await.is_err());
        let snap = f.store.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.total, 1);
        assert!(snap.mutation_error.as_deref().unwrap().contains("bad draft"));
        assert!(snap.fetch_error.is_none());
    }

    #[tokio::test]
    async fn test_delete_scrubs_everywhere() {
        let f = fixture(vec![product("p1", "Shirt", 1000), product("p2", "Mug", 500)]);
        f.store.fetch().await.unwrap();
        f.store.select([id("p1")]);
        f.store.set_detail(&id("p1")).unwrap();

        f.store.delete(&id("p1")).await.unwrap();

        let snap = f.store.snapshot();
        assert_eq!(snap.total, 1);
        assert!(snap.items.iter().all(|p| p.id != id("p1")));
        assert!(snap.selected.is_empty());
        assert!(snap.detail.is_none());
        assert!(f.store.get(&id("p1")).is_none());
    }

    #[tokio::test]
    async fn test_patch_refreshes_detail_view() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.set_detail(&id("p1")).unwrap();

        f.store.patch(&id("p1"), json!({ "price": 1200 })).await.unwrap();
        assert_eq!(f.store.snapshot().detail.unwrap().price, 1200);
    }

    #[tokio::test]
    async fn test_selection_cleared_on_refetch() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.select_all();
        assert_eq!(f.store.selected_ids().len(), 1);

        f.clock.advance(Duration::from_secs(120));
        f.store.fetch().await.unwrap();
        assert!(f.store.selected_ids().is_empty());
    }

    #[tokio::test]
    async fn test_select_ignores_unknown_ids() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.select([id("p1"), id("ghost")]);
        assert_eq!(f.store.selected_ids(), vec![id("p1")]);
        f.store.toggle(id("ghost"));
        assert_eq!(f.store.selected_ids(), vec![id("p1")]);
    }

    #[tokio::test]
    async fn test_clear_selection_idempotent() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.select_all();
        f.store.clear_selection();
        assert!(f.store.selected_ids().is_empty());
        f.store.clear_selection();
        assert!(f.store.selected_ids().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_patch_all_or_nothing() {
        let f = fixture(vec![product("p1", "Shirt", 1000), product("p2", "Mug", 500)]);
        f.store.fetch().await.unwrap();
        f.store.select_all();

        // Second target fails; ids() is sorted so p2 is the second call.
        f.backend.fail_next_api(CallKind::Patch, Some(id("p2")), 500, "boom");
        let err = f.store
            .bulk_patch(None, json!({ "status": "archived" }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));

        // The backend applied p1 before the failure, but the store commits
        // neither: local state still shows both records unchanged.
        let snap = f.store.snapshot();
        assert!(snap.items.iter().all(|p| p.status == "active"));
        assert!(snap.mutation_error.is_some());
    }

    #[tokio::test]
    async fn test_bulk_patch_success_commits_all() {
        let f = fixture(vec![product("p1", "Shirt", 1000), product("p2", "Mug", 500)]);
        f.store.fetch().await.unwrap();
        f.store.select_all();

        let updated = f.store
            .bulk_patch(None, json!({ "status": "archived" }))
            .await
            .unwrap();
        assert_eq!(updated.len(), 2);
        assert!(f.store.snapshot().items.iter().all(|p| p.status == "archived"));
    }

    #[tokio::test]
    async fn test_bulk_rejects_dangling_ids() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        let err = f.store
            .bulk_patch(Some(vec![id("ghost")]), json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(f.backend.call_count(CallKind::Patch), 0);
    }

    #[tokio::test]
    async fn test_bulk_delete() {
        let f = fixture(vec![product("p1", "Shirt", 1000), product("p2", "Mug", 500)]);
        f.store.fetch().await.unwrap();
        let removed = f.store
            .bulk_delete(Some(vec![id("p1"), id("p2")]))
            .await
            .unwrap();
        assert_eq!(removed, 2);
        let snap = f.store.snapshot();
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
    }

    #[tokio::test]
    async fn test_pagination_no_ops_at_edges() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        assert!(!f.store.next_page().await.unwrap());
        assert!(!f.store.previous_page().await.unwrap());
        assert_eq!(f.backend.call_count(CallKind::List), 1);
    }

    #[tokio::test]
    async fn test_pagination_walks_pages() {
        let f = fixture((0..45).map(|i| product(&format!("p{i:02}"), "P", 100)).collect());
        f.store.fetch().await.unwrap();
        let snap = f.store.snapshot();
        assert_eq!(snap.items.len(), 20);
        assert_eq!(snap.page.total_pages, 3);

        assert!(f.store.next_page().await.unwrap());
        assert_eq!(f.store.snapshot().page.page, 2);
        assert!(f.store.previous_page().await.unwrap());
        assert_eq!(f.store.snapshot().page.page, 1);
    }

    #[tokio::test]
    async fn test_fetch_one_joins_listing_without_total_change() {
        let f = fixture(vec![product("p1", "Shirt", 1000), product("p2", "Mug", 500)]);
        let mut query = ListQuery::default();
        query.per_page = 1;
        f.store.fetch_with(query).await.unwrap();
        assert_eq!(f.store.snapshot().items.len(), 1);

        let fetched = f.store.fetch_one(&id("p2")).await.unwrap();
        assert_eq!(fetched.name, "Mug");
        let snap = f.store.snapshot();
        assert_eq!(snap.items.len(), 2); // appended to the listing
        assert_eq!(snap.items[1].id, id("p2"));
        assert_eq!(snap.total, 2); // total unchanged

        // fetching an already-listed record refreshes it in place
        f.store.fetch_one(&id("p1")).await.unwrap();
        assert_eq!(f.store.snapshot().items.len(), 2);
    }

    #[tokio::test]
    async fn test_scope_change_drops_cache() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.select_all();

        f.store.set_scope(ViewScope::Vendor(id("v1")));
        let snap = f.store.snapshot();
        assert!(snap.items.is_empty());
        assert!(snap.selected.is_empty());
        assert_eq!(snap.query.page, 1);

        // cache invalidated: next fetch goes to the network
        f.store.fetch().await.unwrap();
        assert_eq!(f.backend.call_count(CallKind::List), 2);
    }

    #[tokio::test]
    async fn test_set_same_scope_is_noop() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.set_scope(ViewScope::Unscoped);
        assert_eq!(f.store.snapshot().items.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_resets_view_state() {
        let f = fixture(vec![product("p1", "Shirt", 1000)]);
        f.store.fetch().await.unwrap();
        f.store.clear();
        let snap = f.store.snapshot();
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
        assert!(f.store.last_fetch().is_none());
    }
}
