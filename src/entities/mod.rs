//! sea-orm entity definitions for the reconciliation core.

pub mod balance_sheet;
pub mod employee_stock;
pub mod expense;
pub mod product;
pub mod product_adjustment;
pub mod product_delivery;
pub mod stock_movement;
pub mod stock_transfer;
pub mod warehouse_inventory;
