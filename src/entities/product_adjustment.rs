use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AdjustmentDirection {
    #[sea_orm(string_value = "increase")]
    Increase,
    #[sea_orm(string_value = "decrease")]
    Decrease,
}

/// Adjustment workflow status; Approved is terminal for adjustments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum AdjustmentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl AdjustmentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

/// Requested change to a product's master stock quantity.
///
/// The target quantity is precomputed at creation time: `old + delta` for
/// an increase, `max(0, old - delta)` for a decrease. When the decrease is
/// clamped at zero, `quantity_adjusted` records the effective magnitude
/// (`old - new`), which may be smaller than `quantity_requested`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_adjustments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub direction: AdjustmentDirection,
    pub quantity_requested: i32,
    pub quantity_adjusted: i32,
    pub previous_quantity: i32,
    pub new_quantity: i32,
    pub reason: Option<String>,
    pub status: AdjustmentStatus,
    pub requested_by: Option<i64>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// True when the decrease clamp shrank the effective adjustment.
    pub fn is_partial(&self) -> bool {
        self.quantity_adjusted != self.quantity_requested
    }
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
    fn approved_is_terminal_for_adjustments() {
        assert!(AdjustmentStatus::Approved.is_terminal());
        assert!(!AdjustmentStatus::Approved.can_transition_to(AdjustmentStatus::Rejected));
        assert!(!AdjustmentStatus::Rejected.can_transition_to(AdjustmentStatus::Approved));
    }
}
