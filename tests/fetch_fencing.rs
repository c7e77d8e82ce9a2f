//! Overlapping listing fetches: the last request issued wins
//!
//! These tests script per-call response delays so that responses resolve
//! out of issue order, and assert that only the most recently issued
//! fetch ever commits to the collection.

mod common;

use async_trait::async_trait;
use common::product;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use vitrine::{
    Clock, EntityBackend, EntityId, EntityStore, Error, ListQuery, ManualClock, Page, PageInfo,
    Product, Result, StoreConfig, Timestamp, ViewScope,
};

/// Backend whose list responses resolve after scripted delays, in call order
struct ScriptedListBackend {
    script: Mutex<VecDeque<(Duration, Result<Vec<Product>>)>>,
}

impl ScriptedListBackend {
    fn new() -> Self {
        ScriptedListBackend { script: Mutex::new(VecDeque::new()) }
    }

    fn push(&self, delay: Duration, records: Vec<Product>) {
        self.script.lock().push_back((delay, Ok(records)));
    }

    fn push_failure(&self, delay: Duration, message: &str) {
        self.script
            .lock()
            .push_back((delay, Err(Error::Transport(message.into()))));
    }
}

#[async_trait]
impl EntityBackend<Product> for ScriptedListBackend {
    async fn list(&self, _scope: &ViewScope, query: &ListQuery) -> Result<Page<Product>> {
        let (delay, outcome) = self
            .script
            .lock()
            .pop_front()
            .expect("list call beyond the script");
        tokio::time::sleep(delay).await;
        let records = outcome?;
        let total = records.len() as u64;
        Ok(Page {
            records,
            info: PageInfo {
                page: query.page,
                total,
                total_pages: 1,
                has_next: false,
                has_previous: false,
            },
        })
    }

    async fn get(&self, id: &EntityId) -> Result<Product> {
        Err(Error::NotFound(id.clone()))
    }

    async fn create(&self, _draft: Value) -> Result<Product> {
        Err(Error::Transport("not scripted".into()))
    }

    async fn update(&self, _id: &EntityId, _body: Value) -> Result<Product> {
        Err(Error::Transport("not scripted".into()))
    }

    async fn patch(&self, _id: &EntityId, _body: Value) -> Result<Product> {
        Err(Error::Transport("not scripted".into()))
    }

    async fn delete(&self, _id: &EntityId) -> Result<()> {
        Err(Error::Transport("not scripted".into()))
    }
}

fn store_over(backend: Arc<ScriptedListBackend>) -> Arc<EntityStore<Product>> {
    Arc::new(EntityStore::new(
        "products",
        backend as Arc<dyn EntityBackend<Product>>,
        Arc::new(ManualClock::at(Timestamp::from_secs(1_000))) as Arc<dyn Clock>,
        StoreConfig::default(),
    ))
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_fetch_is_dropped() {
    let backend = Arc::new(ScriptedListBackend::new());
    backend.push(
        Duration::from_millis(300),
        vec![product("p-old", "v1", "Stale", 100)],
    );
    backend.push(
        Duration::from_millis(10),
        vec![product("p-new", "v1", "Live", 200)],
    );
    let store = store_over(backend);

    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch().await })
    };
    // let the first fetch reach its backend await before issuing the second
    tokio::task::yield_now().await;

    store.fetch_with(ListQuery::default()).await.unwrap();
    // the superseded fetch resolves after the commit and is dropped, not an error
    slow.await.unwrap().unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.items.len(), 1);
    assert_eq!(snap.items[0].name, "Live");
    assert!(!snap.loading);
}

#[tokio::test(start_paused = true)]
async fn test_earlier_response_dropped_while_later_still_pending() {
    let backend = Arc::new(ScriptedListBackend::new());
    backend.push(
        Duration::from_millis(50),
        vec![product("p-old", "v1", "Stale", 100)],
    );
    backend.push(
        Duration::from_millis(300),
        vec![product("p-new", "v1", "Live", 200)],
    );
    let store = store_over(backend);

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch().await })
    };
    tokio::task::yield_now().await;

    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch_with(ListQuery::default()).await })
    };

    // the first response has resolved by now, the second has not: nothing
    // was committed and the store still reports a fetch in flight
    tokio::time::sleep(Duration::from_millis(100)).await;
    first.await.unwrap().unwrap();
    assert!(store.snapshot().items.is_empty());
    assert!(store.is_loading());

    second.await.unwrap().unwrap();
    let snap = store.snapshot();
    assert_eq!(snap.items.len(), 1);
    assert_eq!(snap.items[0].name, "Live");
    assert!(!snap.loading);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_failure_does_not_clobber_committed_page() {
    let backend = Arc::new(ScriptedListBackend::new());
    backend.push_failure(Duration::from_millis(300), "connection reset");
    backend.push(
        Duration::from_millis(10),
        vec![product("p-new", "v1", "Live", 200)],
    );
    let store = store_over(backend);

    let slow = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch().await })
    };
    tokio::task::yield_now().await;

    store.fetch_with(ListQuery::default()).await.unwrap();
    slow.await.unwrap().unwrap();

    // the stale failure neither empties the collection nor records an error
    let snap = store.snapshot();
    assert_eq!(snap.items.len(), 1);
    assert_eq!(snap.items[0].name, "Live");
    assert!(snap.fetch_error.is_none());
}
