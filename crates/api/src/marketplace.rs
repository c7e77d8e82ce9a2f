//! The top-level client facade
//!
//! One `Marketplace` per application root. Construction injects every
//! collaborator — product and order backends, auth backend, session vault,
//! clock — and hydrates the session from the vault, so a reloaded page
//! resumes a persisted login.

use crate::orders::OrderStore;
use std::sync::Arc;
use vitrine_core::{Clock, Error, Order, Product, Result, Role, ViewScope};
use vitrine_session::{
    AccessDecision, AccessPolicy, AuthBackend, SessionConfig, SessionStore, SessionVault,
};
use vitrine_store::{EntityStore, StoreConfig};
use vitrine_transport::EntityBackend;

/// Facade-wide configuration
#[derive(Debug, Clone, Default)]
pub struct MarketplaceConfig {
    pub products: StoreConfig,
    pub orders: StoreConfig,
    pub session: SessionConfig,
}

/// The marketplace client: product, order, and session stores
pub struct Marketplace {
    products: EntityStore<Product>,
    orders: OrderStore,
    session: SessionStore,
}

impl Marketplace {
    /// Construct the facade and hydrate the session from the vault
    ///
    /// A vault that fails to load is treated as empty (logged, not fatal):
    /// the user simply is not logged in.
    pub fn new(
        products_backend: Arc<dyn EntityBackend<Product>>,
        orders_backend: Arc<dyn EntityBackend<Order>>,
        auth_backend: Arc<dyn AuthBackend>,
        vault: Arc<dyn SessionVault>,
        clock: Arc<dyn Clock>,
        config: MarketplaceConfig,
    ) -> Self {
        let session = SessionStore::new(auth_backend, vault, clock.clone(), config.session);
        if let Err(err) = session.restore() {
            tracing::warn!(error = %err, "session restore failed, starting logged out");
        }
        Marketplace {
            products: EntityStore::new("products", products_backend, clock.clone(), config.products),
            orders: OrderStore::new(orders_backend, clock, config.orders),
            session,
        }
    }

    /// The product store (full CRUD surface, including delete)
    pub fn products(&self) -> &EntityStore<Product> {
        &self.products
    }

    /// The order store (scoped fetches and status transitions)
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// The auth session
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Point the order store at the authenticated user's natural scope
    ///
    /// An explicit call, made by the hosting page: buyers see their own
    /// orders, vendors theirs, admins everything. Fails when nobody is
    /// logged in.
    pub fn view_orders_as_current_user(&self) -> Result<()> {
        let user = self.session.user().ok_or(Error::NotAuthenticated)?;
        if !self.session.is_authenticated() {
            return Err(Error::SessionExpired);
        }
        let scope = match user.role {
            Role::Buyer => ViewScope::Buyer(user.id),
            Role::Vendor => ViewScope::Vendor(user.id),
            Role::Admin => ViewScope::Admin,
        };
        self.orders.view_as(scope);
        Ok(())
    }

    /// Evaluate a route guard against the live session
    pub fn guard(&self, policy: &AccessPolicy) -> AccessDecision {
        policy.evaluate(&self.session)
    }
}
