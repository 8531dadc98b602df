use crate::{
    db::DbPool,
    entities::{
        product::{self, Entity as Product},
        product_adjustment::{self, AdjustmentDirection, AdjustmentStatus, Entity as ProductAdjustment},
        stock_movement::{self, MovementType, StockableType},
    },
    errors::{from_transaction_error, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use std::sync::Arc;
use tracing::{info, warn};

/// Product master stock adjustment workflow.
///
/// The target quantity is precomputed at creation; approval writes the
/// precomputed value, so the counter moves exactly once, at the
/// pending -> approved transition.
pub struct ProductAdjustmentService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone)]
pub struct NewAdjustmentInput {
    pub product_id: i64,
    pub direction: AdjustmentDirection,
    /// Positive magnitude; range-validated by the caller.
    pub quantity: i32,
    pub reason: Option<String>,
    pub requested_by: Option<i64>,
}

/// Approved adjustment plus the movement record it produced.
#[derive(Debug, Clone)]
pub struct AdjustmentOutcome {
    pub adjustment: product_adjustment::Model,
    pub stock_quantity: i32,
    pub movement_id: i64,
}

/// Computes the target quantity for an adjustment. A decrease clamps at
/// zero; the returned effective magnitude may then be smaller than the
/// requested one.
pub fn compute_adjustment(
    old_quantity: i32,
    direction: AdjustmentDirection,
    requested: i32,
) -> (i32, i32) {
    match direction {
        AdjustmentDirection::Increase => (old_quantity + requested, requested),
        AdjustmentDirection::Decrease => {
            let new_quantity = (old_quantity - requested).max(0);
            (new_quantity, old_quantity - new_quantity)
        }
    }
}

impl ProductAdjustmentService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Records a pending adjustment with its target quantity precomputed
    /// from the product's current stock.
    pub async fn create_adjustment(
        &self,
        input: NewAdjustmentInput,
    ) -> Result<product_adjustment::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let product = Product::find_by_id(input.product_id)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product {} not found", input.product_id))
            })?;

        let (new_quantity, adjusted) =
            compute_adjustment(product.stock_quantity, input.direction, input.quantity);

        let now = Utc::now();
        let row = product_adjustment::ActiveModel {
            product_id: Set(input.product_id),
            direction: Set(input.direction),
            quantity_requested: Set(input.quantity),
            quantity_adjusted: Set(adjusted),
            previous_quantity: Set(product.stock_quantity),
            new_quantity: Set(new_quantity),
            reason: Set(input.reason),
            status: Set(AdjustmentStatus::Pending),
            requested_by: Set(input.requested_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = row.insert(db).await.map_err(ServiceError::db_error)?;

        if created.is_partial() {
            warn!(
                "Adjustment {} clamped: requested {} but only {} available on product {}",
                created.id, created.quantity_requested, created.quantity_adjusted, created.product_id
            );

            self.event_sender
                .send(Event::PartialAdjustmentWarning {
                    adjustment_id: created.id,
                    product_id: created.product_id,
                    requested_quantity: created.quantity_requested,
                    quantity_adjusted: created.quantity_adjusted,
                })
                .await
                .map_err(ServiceError::EventError)?;
        }

        Ok(created)
    }

    /// Approves a pending adjustment: writes the precomputed quantity to
    /// the product counter, records one movement row, and stamps the
    /// approval, all in one transaction.
    pub async fn approve_adjustment(
        &self,
        id: i64,
        approved_by: i64,
    ) -> Result<AdjustmentOutcome, ServiceError> {
        let db = self.db_pool.as_ref();

        let outcome = db
            .transaction::<_, AdjustmentOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let adjustment = ProductAdjustment::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Product adjustment {} not found", id))
                        })?;

                    if !adjustment
                        .status
                        .can_transition_to(AdjustmentStatus::Approved)
                    {
                        return Err(ServiceError::InvalidStatus(format!(
                            "Product adjustment {} is {} and cannot be approved",
                            id, adjustment.status
                        )));
                    }

                    let product = Product::find_by_id(adjustment.product_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Product {} not found",
                                adjustment.product_id
                            ))
                        })?;

                    let quantity_before = product.stock_quantity;
                    let quantity_after = adjustment.new_quantity;

                    let mut active_product: product::ActiveModel = product.into();
                    active_product.stock_quantity = Set(quantity_after);
                    active_product.updated_at = Set(Utc::now());
                    active_product
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let movement = stock_movement::ActiveModel {
                        stockable_type: Set(StockableType::Product),
                        stockable_id: Set(adjustment.product_id),
                        product_id: Set(adjustment.product_id),
                        quantity_change: Set(quantity_after - quantity_before),
                        quantity_before: Set(quantity_before),
                        quantity_after: Set(quantity_after),
                        movement_type: Set(MovementType::Adjustment),
                        notes: Set(adjustment.reason.clone()),
                        created_by: Set(Some(approved_by)),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    let movement = movement.insert(txn).await.map_err(ServiceError::db_error)?;

                    let mut active: product_adjustment::ActiveModel = adjustment.clone().into();
                    active.status = Set(AdjustmentStatus::Approved);
                    active.approved_by = Set(Some(approved_by));
                    active.approved_at = Set(Some(Utc::now()));
                    active.updated_at = Set(Utc::now());
                    let approved = active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(AdjustmentOutcome {
                        adjustment: approved,
                        stock_quantity: quantity_after,
                        movement_id: movement.id,
                    })
                })
            })
            .await
            .map_err(from_transaction_error)?;

        info!(
            "Approved adjustment {} on product {}: {} -> {}",
            outcome.adjustment.id,
            outcome.adjustment.product_id,
            outcome.adjustment.previous_quantity,
            outcome.adjustment.new_quantity
        );

        self.event_sender
            .send(Event::ProductAdjustmentApproved {
                adjustment_id: outcome.adjustment.id,
                product_id: outcome.adjustment.product_id,
                previous_quantity: outcome.adjustment.previous_quantity,
                new_quantity: outcome.adjustment.new_quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(outcome)
    }

    /// Rejects a pending adjustment; status flip only, no counter change.
    pub async fn reject_adjustment(
        &self,
        id: i64,
        rejected_by: i64,
    ) -> Result<product_adjustment::Model, ServiceError> {
        let adjustment = ProductAdjustment::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product adjustment {} not found", id))
            })?;

        if !adjustment
            .status
            .can_transition_to(AdjustmentStatus::Rejected)
        {
            return Err(ServiceError::InvalidStatus(format!(
                "Product adjustment {} is {} and cannot be rejected",
                id, adjustment.status
            )));
        }

        let mut active: product_adjustment::ActiveModel = adjustment.into();
        active.status = Set(AdjustmentStatus::Rejected);
        active.approved_by = Set(Some(rejected_by));
        active.approved_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::ProductAdjustmentRejected { adjustment_id: id })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_adds_the_full_amount() {
        assert_eq!(
            compute_adjustment(10, AdjustmentDirection::Increase, 7),
            (17, 7)
        );
    }

    #[test]
    fn decrease_clamps_at_zero() {
        assert_eq!(
            compute_adjustment(5, AdjustmentDirection::Decrease, 8),
            (0, 5)
        );
    }

    #[test]
    fn unclamped_decrease_keeps_requested_magnitude() {
        assert_eq!(
            compute_adjustment(10, AdjustmentDirection::Decrease, 4),
            (6, 4)
        );
    }
}
