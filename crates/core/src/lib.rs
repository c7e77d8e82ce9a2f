//! Core types for the vitrine marketplace state layer
//!
//! This crate holds the leaf vocabulary shared by every other crate in the
//! workspace: identifiers, timestamps and the clock seam, the canonical role
//! enum, query/pagination types, domain records, and the error taxonomy.
//!
//! Nothing here performs I/O. Higher layers (transport, store, session, api)
//! depend on this crate and never the other way around.

pub mod clock;
pub mod error;
pub mod id;
pub mod page;
pub mod query;
pub mod records;
pub mod role;
pub mod scope;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use id::EntityId;
pub use page::{Page, PageInfo};
pub use query::{ListQuery, SortDirection, SortSpec};
pub use records::{Keyed, Order, OrderLine, Product, UserProfile};
pub use role::Role;
pub use scope::ViewScope;
pub use timestamp::Timestamp;
