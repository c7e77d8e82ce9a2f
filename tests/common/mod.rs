//! Shared fixtures for the integration suites

// Each integration binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use std::sync::Arc;
use vitrine::{
    AuthBackend, EntityId, ManualClock, Marketplace, MarketplaceConfig, MemoryAuthBackend,
    MemoryBackend, MemoryVault, Order, OrderLine, Product, Timestamp,
};

pub fn product(id: &str, vendor: &str, name: &str, price: i64) -> Product {
    Product {
        id: EntityId::new(id).unwrap(),
        vendor_id: EntityId::new(vendor).unwrap(),
        name: name.into(),
        price,
        stock: 10,
        status: "active".into(),
        created_at: Timestamp::EPOCH,
        updated_at: Timestamp::EPOCH,
    }
}

pub fn order(id: &str, buyer: &str, vendor: &str, status: &str, total: i64) -> Order {
    Order {
        id: EntityId::new(id).unwrap(),
        buyer_id: EntityId::new(buyer).unwrap(),
        vendor_id: EntityId::new(vendor).unwrap(),
        status: status.into(),
        lines: vec![OrderLine {
            product_id: EntityId::new("p1").unwrap(),
            quantity: 1,
            unit_price: total,
        }],
        total,
        placed_at: Timestamp::EPOCH,
    }
}

pub fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

pub struct World {
    pub products: Arc<MemoryBackend<Product>>,
    pub orders: Arc<MemoryBackend<Order>>,
    pub auth: Arc<MemoryAuthBackend>,
    pub vault: Arc<MemoryVault>,
    pub clock: Arc<ManualClock>,
    pub market: Marketplace,
}

/// Route store tracing to the test writer; visible with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A marketplace over seeded in-memory backends and a manual clock
pub fn world(products: Vec<Product>, orders: Vec<Order>) -> World {
    init_tracing();
    let products = Arc::new(MemoryBackend::seeded("prd_", products));
    let orders = Arc::new(MemoryBackend::seeded("ord_", orders));
    let auth = Arc::new(MemoryAuthBackend::new(3_600));
    let vault = Arc::new(MemoryVault::new());
    let clock = Arc::new(ManualClock::at(Timestamp::from_secs(50_000)));
    let market = Marketplace::new(
        products.clone(),
        orders.clone(),
        auth.clone() as Arc<dyn AuthBackend>,
        vault.clone(),
        clock.clone(),
        MarketplaceConfig::default(),
    );
    World { products, orders, auth, vault, clock, market }
}
