use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which stock counter a movement row refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StockableType {
    /// `warehouse_inventories` row, `stockable_id` = warehouse_id
    #[sea_orm(string_value = "warehouse")]
    Warehouse,
    /// `employee_stocks` row, `stockable_id` = employee_id
    #[sea_orm(string_value = "employee")]
    Employee,
    /// `products.stock_quantity`, `stockable_id` = product_id
    #[sea_orm(string_value = "product")]
    Product,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MovementType {
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
}

/// Immutable audit row written once per stock counter mutation,
/// capturing the before and after quantities. Never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub stockable_type: StockableType,
    pub stockable_id: i64,
    pub product_id: i64,
    pub quantity_change: i32,
    pub quantity_before: i32,
    pub quantity_after: i32,
    pub movement_type: MovementType,
    pub notes: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
