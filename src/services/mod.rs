// Ledger services
pub mod balance_sheets;
pub mod deliveries;
pub mod expenses;

// Stock services
pub mod employee_stocks;
pub mod product_adjustments;
pub mod stock_transfers;
