use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-employee running balance record.
///
/// `current_balance` equals the initial balance plus every applied delta
/// (income positive, expense/delivery cost negative). Only the
/// reconciliation services write this field. Rows are created lazily on
/// the first expense or delivery for an employee and never deleted here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "balance_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub product_delivery_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub expense_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub market_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub ta_da: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub current_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Sum of the four tracked amount columns, used by the administrative
    /// direct-edit path to compute the balance difference.
    pub fn total(&self) -> Decimal {
        self.product_delivery_amount + self.expense_amount + self.market_cost + self.ta_da
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
