use crate::{
    db::DbPool,
    entities::{
        employee_stock::{self, Entity as EmployeeStock},
        stock_movement::{self, MovementType, StockableType},
    },
    errors::{from_transaction_error, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use std::sync::Arc;
use tracing::info;

/// Manual employee stock adjustment path.
pub struct EmployeeStockService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone)]
pub struct UpdateStockInput {
    pub quantity: i32,
    pub minimum_quantity: i32,
    pub maximum_quantity: Option<i32>,
    pub notes: Option<String>,
    pub updated_by: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StockUpdateOutcome {
    pub stock: employee_stock::Model,
    pub quantity_change: i32,
    pub movement_id: i64,
}

impl EmployeeStockService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Returns the stock row for an (employee, product) pair, if any.
    pub async fn get_stock(
        &self,
        employee_id: i64,
        product_id: i64,
    ) -> Result<Option<employee_stock::Model>, ServiceError> {
        EmployeeStock::find()
            .filter(employee_stock::Column::EmployeeId.eq(employee_id))
            .filter(employee_stock::Column::ProductId.eq(product_id))
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Overwrites an employee stock row's quantity and advisory bounds in
    /// one transaction. A movement record is written unconditionally, even
    /// when the quantity change is zero.
    pub async fn update_stock(
        &self,
        id: i64,
        input: UpdateStockInput,
    ) -> Result<StockUpdateOutcome, ServiceError> {
        let db = self.db_pool.as_ref();

        let outcome = db
            .transaction::<_, StockUpdateOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let stock = EmployeeStock::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Employee stock {} not found", id))
                        })?;

                    let quantity_before = stock.quantity;
                    let quantity_change = input.quantity - quantity_before;

                    let mut active: employee_stock::ActiveModel = stock.clone().into();
                    active.quantity = Set(input.quantity);
                    active.minimum_quantity = Set(input.minimum_quantity);
                    active.maximum_quantity = Set(input.maximum_quantity);
                    active.updated_at = Set(Utc::now());
                    let updated = active.update(txn).await.map_err(ServiceError::db_error)?;

                    let movement = stock_movement::ActiveModel {
                        stockable_type: Set(StockableType::Employee),
                        stockable_id: Set(updated.employee_id),
                        product_id: Set(updated.product_id),
                        quantity_change: Set(quantity_change),
                        quantity_before: Set(quantity_before),
                        quantity_after: Set(input.quantity),
                        movement_type: Set(MovementType::Adjustment),
                        notes: Set(input.notes),
                        created_by: Set(input.updated_by),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    let movement = movement.insert(txn).await.map_err(ServiceError::db_error)?;

                    Ok(StockUpdateOutcome {
                        stock: updated,
                        quantity_change,
                        movement_id: movement.id,
                    })
                })
            })
            .await
            .map_err(from_transaction_error)?;

        info!(
            "Adjusted employee stock {}: change {}, now {}",
            outcome.stock.id, outcome.quantity_change, outcome.stock.quantity
        );

        self.event_sender
            .send(Event::EmployeeStockAdjusted {
                employee_stock_id: outcome.stock.id,
                product_id: outcome.stock.product_id,
                quantity_change: outcome.quantity_change,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(outcome)
    }
}
