//! Stockledger API Library
//!
//! Ledger and stock reconciliation core: per-employee balance sheets kept
//! consistent with expense and delivery events, warehouse/employee/product
//! stock counters mutated through approval workflows, and an append-only
//! movement audit trail.
//!
//! Callers own HTTP routing, input validation, and authorization; every
//! operation here trusts its inputs and either fully commits or fully
//! rolls back.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod logging;
pub mod migrator;
pub mod services;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state wiring the reconciliation services together.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: Arc<events::EventSender>,
    pub balance_sheets: Arc<services::balance_sheets::BalanceSheetService>,
    pub expenses: Arc<services::expenses::ExpenseService>,
    pub deliveries: Arc<services::deliveries::ProductDeliveryService>,
    pub stock_transfers: Arc<services::stock_transfers::StockTransferService>,
    pub product_adjustments: Arc<services::product_adjustments::ProductAdjustmentService>,
    pub employee_stocks: Arc<services::employee_stocks::EmployeeStockService>,
}

impl AppState {
    /// Builds the full service graph over one connection pool.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: Arc<events::EventSender>,
    ) -> Self {
        let balance_sheets = Arc::new(services::balance_sheets::BalanceSheetService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let expenses = Arc::new(services::expenses::ExpenseService::new(
            db.clone(),
            event_sender.clone(),
            balance_sheets.clone(),
        ));
        let deliveries = Arc::new(services::deliveries::ProductDeliveryService::new(
            db.clone(),
            event_sender.clone(),
            balance_sheets.clone(),
        ));
        let stock_transfers = Arc::new(services::stock_transfers::StockTransferService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let product_adjustments = Arc::new(
            services::product_adjustments::ProductAdjustmentService::new(
                db.clone(),
                event_sender.clone(),
            ),
        );
        let employee_stocks = Arc::new(services::employee_stocks::EmployeeStockService::new(
            db.clone(),
            event_sender.clone(),
        ));

        Self {
            db,
            config,
            event_sender,
            balance_sheets,
            expenses,
            deliveries,
            stock_transfers,
            product_adjustments,
            employee_stocks,
        }
    }
}
