use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transfer workflow status. Counters are mutated exactly once, at the
/// Pending -> Completed transition; every other transition moves no stock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransferStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl TransferStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Exhaustive transition table; no transition leaves a terminal state.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::Cancelled)
        )
    }
}

/// Request to move quantity from a warehouse counter to an employee
/// counter.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub warehouse_id: i64,
    pub employee_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
    pub status: TransferStatus,
    pub requested_by: Option<i64>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_transitions_exist() {
        for terminal in [
            TransferStatus::Completed,
            TransferStatus::Rejected,
            TransferStatus::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            for next in [
                TransferStatus::Pending,
                TransferStatus::Completed,
                TransferStatus::Rejected,
                TransferStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::Completed));
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::Cancelled));
    }
}
