//! Scriptable in-memory backend
//!
//! `MemoryBackend` implements [`EntityBackend`] over an in-memory table so
//! that store behaviour can be exercised without a server. It behaves like
//! the real backend where the stores can observe it:
//!
//! - ids are minted server-side (uuid v4) — drafts arrive without one
//! - list responses honour scope filters, explicit filters, search, sort,
//!   and pagination, and report the cross-page total
//! - faults can be scripted per operation (and optionally per id), and
//!   every call is recorded so tests can assert that a fresh cache issued
//!   no call at all

use crate::backend::{CallKind, EntityBackend};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;
use vitrine_core::{EntityId, Error, Keyed, ListQuery, Page, PageInfo, Result, SortDirection, ViewScope};

/// One observed backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub kind: CallKind,
    pub id: Option<EntityId>,
}

/// A scripted failure
#[derive(Debug, Clone)]
enum Fault {
    Transport(String),
    Api { status: u16, message: String },
}

impl Fault {
    fn to_error(&self) -> Error {
        match self {
            Fault::Transport(msg) => Error::Transport(msg.clone()),
            Fault::Api { status, message } => Error::Api {
                status: *status,
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug)]
struct ScriptedFault {
    kind: CallKind,
    id: Option<EntityId>,
    fault: Fault,
}

struct Inner<T> {
    records: Vec<T>,
    faults: Vec<ScriptedFault>,
    calls: Vec<CallRecord>,
}

/// In-memory implementation of [`EntityBackend`]
pub struct MemoryBackend<T> {
    inner: Mutex<Inner<T>>,
    id_prefix: &'static str,
}

impl<T> MemoryBackend<T>
where
    T: Keyed + Clone,
{
    /// Empty backend; ids are minted with the given prefix (e.g. `"prd_"`)
    pub fn new(id_prefix: &'static str) -> Self {
        MemoryBackend {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                faults: Vec::new(),
                calls: Vec::new(),
            }),
            id_prefix,
        }
    }

    /// Backend pre-populated with records, in server order
    pub fn seeded(id_prefix: &'static str, records: Vec<T>) -> Self {
        let backend = MemoryBackend::new(id_prefix);
        backend.inner.lock().records = records;
        backend
    }

    /// Script the next matching call to fail with a transport error
    pub fn fail_next_transport(&self, kind: CallKind, id: Option<EntityId>, message: &str) {
        self.inner.lock().faults.push(ScriptedFault {
            kind,
            id,
            fault: Fault::Transport(message.into()),
        });
    }

    /// Script the next matching call to fail with an API error
    pub fn fail_next_api(&self, kind: CallKind, id: Option<EntityId>, status: u16, message: &str) {
        self.inner.lock().faults.push(ScriptedFault {
            kind,
            id,
            fault: Fault::Api { status, message: message.into() },
        });
    }

    /// Every call observed so far, in order
    pub fn calls(&self) -> Vec<CallRecord> {
        self.inner.lock().calls.clone()
    }

    /// Number of calls of one kind observed so far
    pub fn call_count(&self, kind: CallKind) -> usize {
        self.inner.lock().calls.iter().filter(|c| c.kind == kind).count()
    }

    /// Snapshot of the stored records, in server order
    pub fn records(&self) -> Vec<T> {
        self.inner.lock().records.clone()
    }

    /// Record the call, then consume and return the first matching
    /// scripted fault, if any
    fn observe(&self, kind: CallKind, id: Option<&EntityId>) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(CallRecord { kind, id: id.cloned() });
        let position = inner
            .faults
            .iter()
            .position(|f| f.kind == kind && (f.id.is_none() || f.id.as_ref() == id));
        if let Some(position) = position {
            let fault = inner.faults.remove(position);
            tracing::debug!(kind = %kind, "memory backend: scripted fault fired");
            return Err(fault.fault.to_error());
        }
        Ok(())
    }
}

/// Shallow-merge `patch` into `base` (both must be JSON objects)
fn merge_objects(base: &mut Value, patch: &Value) -> Result<()> {
    match (base.as_object_mut(), patch.as_object()) {
        (Some(base), Some(patch)) => {
            for (k, v) in patch {
                base.insert(k.clone(), v.clone());
            }
            Ok(())
        }
        _ => Err(Error::Validation("patch body must be a JSON object".into())),
    }
}

/// Compare two JSON values for sorting: numbers numerically, strings
/// lexicographically, everything else by serialized form
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn field_matches(record: &Value, key: &str, expected: &str) -> bool {
    match record.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

fn matches_search(record: &Value, term: &str) -> bool {
    let needle = term.to_lowercase();
    record
        .as_object()
        .map(|fields| {
            fields.values().any(|v| match v {
                Value::String(s) => s.to_lowercase().contains(&needle),
                _ => false,
            })
        })
        .unwrap_or(false)
}

#[async_trait]
impl<T> EntityBackend<T> for MemoryBackend<T>
where
    T: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    async fn list(&self, scope: &ViewScope, query: &ListQuery) -> Result<Page<T>> {
        self.observe(CallKind::List, None)?;
        let records = self.inner.lock().records.clone();

        let mut matched: Vec<(T, Value)> = Vec::new();
        for record in records {
            let json = serde_json::to_value(&record)?;
            let scope_ok = scope
                .implicit_filter()
                .map(|(field, value)| field_matches(&json, field, value))
                .unwrap_or(true);
            let filters_ok = query
                .filters
                .iter()
                .all(|(k, v)| field_matches(&json, k, v));
            let search_ok = query
                .search
                .as_deref()
                .map(|term| matches_search(&json, term))
                .unwrap_or(true);
            if scope_ok && filters_ok && search_ok {
                matched.push((record, json));
            }
        }

        if let Some(sort) = &query.sort {
            matched.sort_by(|(_, a), (_, b)| {
                let ordering = compare_values(
                    a.get(&sort.field).unwrap_or(&Value::Null),
                    b.get(&sort.field).unwrap_or(&Value::Null),
                );
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        let total = matched.len() as u64;
        let per_page = query.per_page.max(1);
        let total_pages = ((total + per_page as u64 - 1) / per_page as u64) as u32;
        let page = query.page.max(1);
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let records: Vec<T> = matched
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .map(|(record, _)| record)
            .collect();

        Ok(Page {
            records,
            info: PageInfo {
                page,
                total,
                total_pages,
                has_next: page < total_pages,
                has_previous: page > 1 && total_pages > 0,
            },
        })
    }

    async fn get(&self, id: &EntityId) -> Result<T> {
        self.observe(CallKind::Get, Some(id))?;
        let inner = self.inner.lock();
        inner
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn create(&self, draft: Value) -> Result<T> {
        self.observe(CallKind::Create, None)?;
        let mut body = draft;
        let minted = format!("{}{}", self.id_prefix, Uuid::new_v4());
        merge_objects(&mut body, &serde_json::json!({ "id": minted }))?;
        let record: T = serde_json::from_value(body)?;
        self.inner.lock().records.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &EntityId, body: Value) -> Result<T> {
        self.observe(CallKind::Update, Some(id))?;
        let mut body = body;
        merge_objects(&mut body, &serde_json::json!({ "id": id.as_str() }))?;
        let record: T = serde_json::from_value(body)?;
        let mut inner = self.inner.lock();
        let slot = inner
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn patch(&self, id: &EntityId, body: Value) -> Result<T> {
        self.observe(CallKind::Patch, Some(id))?;
        let mut inner = self.inner.lock();
        let slot = inner
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let mut json = serde_json::to_value(&*slot)?;
        merge_objects(&mut json, &body)?;
        // id is immutable even if the patch body tries to change it
        merge_objects(&mut json, &serde_json::json!({ "id": id.as_str() }))?;
        let record: T = serde_json::from_value(json)?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.observe(CallKind::Delete, Some(id))?;
        let mut inner = self.inner.lock();
        let position = inner
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        inner.records.remove(position);
        Ok(())
    }
}
