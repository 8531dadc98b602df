use crate::{
    db::DbPool,
    entities::product_delivery::{self, Entity as ProductDelivery},
    errors::ServiceError,
    events::{Event, EventSender},
    services::balance_sheets::BalanceSheetService,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};
use std::sync::Arc;
use tracing::info;

/// Product delivery service. A delivery's total is deducted from the
/// employee's running balance; edits and deletions apply the inverse.
pub struct ProductDeliveryService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    balance_sheets: Arc<BalanceSheetService>,
}

#[derive(Debug, Clone)]
pub struct NewDeliveryInput {
    pub employee_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub delivered_on: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDeliveryInput {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub delivered_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub delivery: product_delivery::Model,
    pub current_balance: Decimal,
}

fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

impl ProductDeliveryService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        balance_sheets: Arc<BalanceSheetService>,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            balance_sheets,
        }
    }

    async fn find_delivery(&self, id: i64) -> Result<product_delivery::Model, ServiceError> {
        ProductDelivery::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Product delivery {} not found", id)))
    }

    /// Records a delivery and deducts its total from the employee balance.
    pub async fn create_delivery(
        &self,
        input: NewDeliveryInput,
    ) -> Result<DeliveryOutcome, ServiceError> {
        let total = line_total(input.quantity, input.unit_price);
        let now = Utc::now();

        let row = product_delivery::ActiveModel {
            employee_id: Set(input.employee_id),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            unit_price: Set(input.unit_price),
            total_amount: Set(total),
            delivered_on: Set(input.delivered_on),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = row
            .insert(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let sheet = self
            .balance_sheets
            .apply_delta(created.employee_id, -created.total_amount)
            .await?;

        info!(
            "Recorded delivery {} (product {}, total {}) for employee {}",
            created.id, created.product_id, created.total_amount, created.employee_id
        );

        self.event_sender
            .send(Event::DeliveryRecorded {
                delivery_id: created.id,
                employee_id: created.employee_id,
                product_id: created.product_id,
                total_amount: created.total_amount,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(DeliveryOutcome {
            delivery: created,
            current_balance: sheet.current_balance,
        })
    }

    /// Edits a delivery; the recomputed total is reconciled against the
    /// balance as one combined delta (`old_total - new_total`).
    pub async fn update_delivery(
        &self,
        id: i64,
        input: UpdateDeliveryInput,
    ) -> Result<DeliveryOutcome, ServiceError> {
        let existing = self.find_delivery(id).await?;

        let old_total = existing.total_amount;
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let new_total = line_total(quantity, unit_price);

        let mut active: product_delivery::ActiveModel = existing.clone().into();
        active.quantity = Set(quantity);
        active.unit_price = Set(unit_price);
        active.total_amount = Set(new_total);
        if let Some(delivered_on) = input.delivered_on {
            active.delivered_on = Set(delivered_on);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let sheet = if new_total != old_total {
            let sheet = self
                .balance_sheets
                .apply_delta(updated.employee_id, old_total - new_total)
                .await?;

            self.event_sender
                .send(Event::DeliveryAmountChanged {
                    delivery_id: updated.id,
                    employee_id: updated.employee_id,
                    old_total,
                    new_total,
                })
                .await
                .map_err(ServiceError::EventError)?;

            sheet
        } else {
            BalanceSheetService::get_or_create(self.db_pool.as_ref(), updated.employee_id).await?
        };

        Ok(DeliveryOutcome {
            delivery: updated,
            current_balance: sheet.current_balance,
        })
    }

    /// Deletes a delivery and restores its total to the balance.
    pub async fn delete_delivery(&self, id: i64) -> Result<Decimal, ServiceError> {
        let existing = self.find_delivery(id).await?;
        let employee_id = existing.employee_id;
        let total = existing.total_amount;

        existing
            .clone()
            .delete(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let sheet = self.balance_sheets.apply_delta(employee_id, total).await?;

        info!(
            "Deleted delivery {} for employee {}; reversed {}",
            id, employee_id, total
        );

        self.event_sender
            .send(Event::DeliveryReversed {
                delivery_id: id,
                employee_id,
                total_amount: total,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(sheet.current_balance)
    }
}
