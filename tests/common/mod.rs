use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use stockledger_api::{
    db::{establish_connection_with_config, run_migrations, DbConfig, DbPool},
    entities::{balance_sheet, employee_stock, product, warehouse_inventory},
    events::{Event, EventSender},
};
use tokio::sync::mpsc;

/// Fresh in-memory sqlite database with the full schema applied.
///
/// A single connection keeps the in-memory database alive and shared for
/// the whole test.
pub async fn setup_db() -> Arc<DbPool> {
    let cfg = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = establish_connection_with_config(&cfg)
        .await
        .expect("Failed to create DB pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    Arc::new(pool)
}

/// Event channel for tests; keep the receiver alive for the duration of
/// the test or sends will fail.
pub fn test_event_sender() -> (Arc<EventSender>, mpsc::Receiver<Event>) {
    let (sender, rx) = EventSender::channel(100);
    (Arc::new(sender), rx)
}

pub async fn create_test_product(db: &DbPool, sku: &str, stock_quantity: i32) -> product::Model {
    let now = Utc::now();
    let row = product::ActiveModel {
        name: Set(format!("Product {}", sku)),
        sku: Set(sku.to_string()),
        stock_quantity: Set(stock_quantity),
        minimum_quantity: Set(0),
        maximum_quantity: Set(None),
        unit_price: Set(Decimal::new(100, 0)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    row.insert(db).await.expect("Failed to create product")
}

pub async fn create_warehouse_inventory(
    db: &DbPool,
    warehouse_id: i64,
    product_id: i64,
    quantity: i32,
) -> warehouse_inventory::Model {
    let now = Utc::now();
    let row = warehouse_inventory::ActiveModel {
        warehouse_id: Set(warehouse_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        minimum_quantity: Set(0),
        maximum_quantity: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    row.insert(db)
        .await
        .expect("Failed to create warehouse inventory")
}

pub async fn create_employee_stock(
    db: &DbPool,
    employee_id: i64,
    product_id: i64,
    quantity: i32,
) -> employee_stock::Model {
    let now = Utc::now();
    let row = employee_stock::ActiveModel {
        employee_id: Set(employee_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        minimum_quantity: Set(0),
        maximum_quantity: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    row.insert(db)
        .await
        .expect("Failed to create employee stock")
}

pub async fn create_balance_sheet(
    db: &DbPool,
    employee_id: i64,
    current_balance: Decimal,
) -> balance_sheet::Model {
    let now = Utc::now();
    let row = balance_sheet::ActiveModel {
        employee_id: Set(employee_id),
        product_delivery_amount: Set(Decimal::ZERO),
        expense_amount: Set(Decimal::ZERO),
        market_cost: Set(Decimal::ZERO),
        ta_da: Set(Decimal::ZERO),
        current_balance: Set(current_balance),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    row.insert(db)
        .await
        .expect("Failed to create balance sheet")
}
