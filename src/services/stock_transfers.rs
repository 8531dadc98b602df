use crate::{
    db::DbPool,
    entities::{
        employee_stock::{self, Entity as EmployeeStock},
        stock_movement::{self, MovementType, StockableType},
        stock_transfer::{self, Entity as StockTransfer, TransferStatus},
        warehouse_inventory::{self, Entity as WarehouseInventory},
    },
    errors::{from_transaction_error, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

/// Warehouse-to-employee stock transfer workflow.
///
/// Counters move exactly once per transfer, at the pending -> completed
/// transition, inside a single transaction together with the two audit
/// movement records. Any failure rolls everything back and the transfer
/// stays pending.
pub struct StockTransferService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

#[derive(Debug, Clone)]
pub struct NewTransferInput {
    pub warehouse_id: i64,
    pub employee_id: i64,
    pub product_id: i64,
    /// Positive; range-validated by the caller.
    pub quantity: i32,
    pub notes: Option<String>,
    pub requested_by: Option<i64>,
}

/// Committed transfer plus the counter values and audit rows it produced.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub transfer: stock_transfer::Model,
    pub warehouse_quantity: i32,
    pub employee_quantity: i32,
    pub movement_ids: Vec<i64>,
}

impl StockTransferService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    async fn find_transfer(&self, id: i64) -> Result<stock_transfer::Model, ServiceError> {
        StockTransfer::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Stock transfer {} not found", id)))
    }

    /// Records a pending transfer request. No counter is touched.
    pub async fn create_transfer(
        &self,
        input: NewTransferInput,
    ) -> Result<stock_transfer::Model, ServiceError> {
        let now = Utc::now();
        let row = stock_transfer::ActiveModel {
            warehouse_id: Set(input.warehouse_id),
            employee_id: Set(input.employee_id),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            notes: Set(input.notes),
            status: Set(TransferStatus::Pending),
            requested_by: Set(input.requested_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        row.insert(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Approves a pending transfer: decrements the warehouse counter,
    /// upserts the employee counter, writes the transfer_out/transfer_in
    /// movement pair, and marks the transfer completed, all in one
    /// transaction.
    pub async fn approve_transfer(
        &self,
        id: i64,
        approved_by: i64,
    ) -> Result<TransferOutcome, ServiceError> {
        let db = self.db_pool.as_ref();

        let outcome = db
            .transaction::<_, TransferOutcome, ServiceError>(move |txn| {
                Box::pin(async move {
                    let transfer = StockTransfer::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Stock transfer {} not found", id))
                        })?;

                    if !transfer.status.can_transition_to(TransferStatus::Completed) {
                        return Err(ServiceError::InvalidStatus(format!(
                            "Stock transfer {} is {} and cannot be approved",
                            id, transfer.status
                        )));
                    }

                    let source = WarehouseInventory::find()
                        .filter(
                            warehouse_inventory::Column::WarehouseId.eq(transfer.warehouse_id),
                        )
                        .filter(warehouse_inventory::Column::ProductId.eq(transfer.product_id))
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "No warehouse inventory for warehouse {} product {}",
                                transfer.warehouse_id, transfer.product_id
                            ))
                        })?;

                    if source.quantity < transfer.quantity {
                        return Err(ServiceError::InsufficientStock(format!(
                            "Warehouse {} holds {} of product {}, transfer needs {}",
                            transfer.warehouse_id,
                            source.quantity,
                            transfer.product_id,
                            transfer.quantity
                        )));
                    }

                    let source_before = source.quantity;
                    let source_after = source_before - transfer.quantity;

                    let mut active_source: warehouse_inventory::ActiveModel =
                        source.clone().into();
                    active_source.quantity = Set(source_after);
                    active_source.updated_at = Set(Utc::now());
                    active_source
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let destination = EmployeeStock::find()
                        .filter(employee_stock::Column::EmployeeId.eq(transfer.employee_id))
                        .filter(employee_stock::Column::ProductId.eq(transfer.product_id))
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let (dest_before, dest_after) = match destination {
                        Some(stock) => {
                            let before = stock.quantity;
                            let after = before + transfer.quantity;
                            let mut active: employee_stock::ActiveModel = stock.into();
                            active.quantity = Set(after);
                            active.updated_at = Set(Utc::now());
                            active.update(txn).await.map_err(ServiceError::db_error)?;
                            (before, after)
                        }
                        None => {
                            let now = Utc::now();
                            let row = employee_stock::ActiveModel {
                                employee_id: Set(transfer.employee_id),
                                product_id: Set(transfer.product_id),
                                quantity: Set(transfer.quantity),
                                minimum_quantity: Set(0),
                                maximum_quantity: Set(None),
                                created_at: Set(now),
                                updated_at: Set(now),
                                ..Default::default()
                            };
                            row.insert(txn).await.map_err(ServiceError::db_error)?;
                            (0, transfer.quantity)
                        }
                    };

                    let out_movement = stock_movement::ActiveModel {
                        stockable_type: Set(StockableType::Warehouse),
                        stockable_id: Set(transfer.warehouse_id),
                        product_id: Set(transfer.product_id),
                        quantity_change: Set(-transfer.quantity),
                        quantity_before: Set(source_before),
                        quantity_after: Set(source_after),
                        movement_type: Set(MovementType::TransferOut),
                        notes: Set(Some(format!("Transfer {} out of warehouse", transfer.id))),
                        created_by: Set(Some(approved_by)),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    let out_movement = out_movement
                        .insert(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let in_movement = stock_movement::ActiveModel {
                        stockable_type: Set(StockableType::Employee),
                        stockable_id: Set(transfer.employee_id),
                        product_id: Set(transfer.product_id),
                        quantity_change: Set(transfer.quantity),
                        quantity_before: Set(dest_before),
                        quantity_after: Set(dest_after),
                        movement_type: Set(MovementType::TransferIn),
                        notes: Set(Some(format!("Transfer {} in to employee", transfer.id))),
                        created_by: Set(Some(approved_by)),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    let in_movement = in_movement
                        .insert(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let mut active_transfer: stock_transfer::ActiveModel =
                        transfer.clone().into();
                    active_transfer.status = Set(TransferStatus::Completed);
                    active_transfer.approved_by = Set(Some(approved_by));
                    active_transfer.approved_at = Set(Some(Utc::now()));
                    active_transfer.updated_at = Set(Utc::now());
                    let completed = active_transfer
                        .update(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    Ok(TransferOutcome {
                        transfer: completed,
                        warehouse_quantity: source_after,
                        employee_quantity: dest_after,
                        movement_ids: vec![out_movement.id, in_movement.id],
                    })
                })
            })
            .await
            .map_err(from_transaction_error)?;

        info!(
            "Completed stock transfer {}: {} of product {} from warehouse {} to employee {}",
            outcome.transfer.id,
            outcome.transfer.quantity,
            outcome.transfer.product_id,
            outcome.transfer.warehouse_id,
            outcome.transfer.employee_id
        );

        self.event_sender
            .send(Event::StockTransferCompleted {
                transfer_id: outcome.transfer.id,
                warehouse_id: outcome.transfer.warehouse_id,
                employee_id: outcome.transfer.employee_id,
                product_id: outcome.transfer.product_id,
                quantity: outcome.transfer.quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(outcome)
    }

    /// Rejects a pending transfer. No counter mutation.
    pub async fn reject_transfer(
        &self,
        id: i64,
        rejected_by: i64,
    ) -> Result<stock_transfer::Model, ServiceError> {
        let transfer = self.find_transfer(id).await?;

        if !transfer.status.can_transition_to(TransferStatus::Rejected) {
            return Err(ServiceError::InvalidStatus(format!(
                "Stock transfer {} is {} and cannot be rejected",
                id, transfer.status
            )));
        }

        let mut active: stock_transfer::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Rejected);
        active.approved_by = Set(Some(rejected_by));
        active.approved_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::StockTransferRejected { transfer_id: id })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }

    /// Cancels a pending transfer, appending the reason to its notes.
    /// Nothing to undo: approval is the only point of counter mutation.
    pub async fn cancel_transfer(
        &self,
        id: i64,
        reason: Option<String>,
    ) -> Result<stock_transfer::Model, ServiceError> {
        let transfer = self.find_transfer(id).await?;

        if !transfer.status.can_transition_to(TransferStatus::Cancelled) {
            return Err(ServiceError::InvalidStatus(format!(
                "Stock transfer {} is {} and cannot be cancelled",
                id, transfer.status
            )));
        }

        let notes = match (&transfer.notes, reason) {
            (Some(existing), Some(reason)) => Some(format!("{}\nCancelled: {}", existing, reason)),
            (None, Some(reason)) => Some(format!("Cancelled: {}", reason)),
            (existing, None) => existing.clone(),
        };

        let mut active: stock_transfer::ActiveModel = transfer.into();
        active.status = Set(TransferStatus::Cancelled);
        active.notes = Set(notes);
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::StockTransferCancelled { transfer_id: id })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }
}
