use crate::{
    db::DbPool,
    entities::balance_sheet::{self, Entity as BalanceSheet},
    errors::{from_transaction_error, ServiceError},
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

/// Ledger mutation service.
///
/// Every balance change in the system routes through [`apply_delta`], so
/// an amount edit is applied as one combined delta rather than a reversal
/// followed by a re-application.
///
/// [`apply_delta`]: BalanceSheetService::apply_delta
pub struct BalanceSheetService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

/// Administrative direct-edit payload; all four amounts overwrite the
/// stored values unconditionally.
#[derive(Debug, Clone)]
pub struct UpdateBalanceSheetInput {
    pub product_delivery_amount: Decimal,
    pub expense_amount: Decimal,
    pub market_cost: Decimal,
    pub ta_da: Decimal,
}

impl UpdateBalanceSheetInput {
    pub fn total(&self) -> Decimal {
        self.product_delivery_amount + self.expense_amount + self.market_cost + self.ta_da
    }
}

impl BalanceSheetService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Fetches the balance sheet for an employee, creating it with a zero
    /// balance on first use. Idempotent; callers inside a transaction pass
    /// the transaction connection.
    pub async fn get_or_create<C: ConnectionTrait>(
        conn: &C,
        employee_id: i64,
    ) -> Result<balance_sheet::Model, ServiceError> {
        let existing = BalanceSheet::find()
            .filter(balance_sheet::Column::EmployeeId.eq(employee_id))
            .one(conn)
            .await
            .map_err(ServiceError::db_error)?;

        if let Some(sheet) = existing {
            return Ok(sheet);
        }

        let now = Utc::now();
        let sheet = balance_sheet::ActiveModel {
            employee_id: Set(employee_id),
            product_delivery_amount: Set(Decimal::ZERO),
            expense_amount: Set(Decimal::ZERO),
            market_cost: Set(Decimal::ZERO),
            ta_da: Set(Decimal::ZERO),
            current_balance: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        info!("Creating balance sheet for employee {}", employee_id);

        sheet.insert(conn).await.map_err(ServiceError::db_error)
    }

    /// Returns the balance sheet for an employee, if one exists.
    pub async fn get_by_employee(
        &self,
        employee_id: i64,
    ) -> Result<Option<balance_sheet::Model>, ServiceError> {
        BalanceSheet::find()
            .filter(balance_sheet::Column::EmployeeId.eq(employee_id))
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Applies a signed delta to an employee's running balance in one
    /// transaction, lazily creating the row. Income is positive; expense
    /// and delivery costs are negative.
    pub async fn apply_delta(
        &self,
        employee_id: i64,
        delta: Decimal,
    ) -> Result<balance_sheet::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let updated = db
            .transaction::<_, balance_sheet::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let sheet = Self::get_or_create(txn, employee_id).await?;

                    let mut active: balance_sheet::ActiveModel = sheet.clone().into();
                    active.current_balance = Set(sheet.current_balance + delta);
                    active.updated_at = Set(Utc::now());

                    active.update(txn).await.map_err(ServiceError::db_error)
                })
            })
            .await
            .map_err(from_transaction_error)?;

        info!(
            "Applied balance delta {} for employee {}; new balance {}",
            delta, employee_id, updated.current_balance
        );

        Ok(updated)
    }

    /// Administrative direct edit of a balance sheet row.
    ///
    /// Recomputes the row total from the payload, applies the difference
    /// against `current_balance`, and overwrites the four amount columns,
    /// all inside one explicit transaction.
    pub async fn update_balance_sheet(
        &self,
        id: i64,
        input: UpdateBalanceSheetInput,
    ) -> Result<balance_sheet::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        let new_total = input.total();

        let (updated, difference) = db
            .transaction::<_, (balance_sheet::Model, Decimal), ServiceError>(move |txn| {
                Box::pin(async move {
                    let sheet = BalanceSheet::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Balance sheet {} not found", id))
                        })?;

                    let old_total = sheet.total();
                    let difference = new_total - old_total;

                    let mut active: balance_sheet::ActiveModel = sheet.clone().into();
                    active.product_delivery_amount = Set(input.product_delivery_amount);
                    active.expense_amount = Set(input.expense_amount);
                    active.market_cost = Set(input.market_cost);
                    active.ta_da = Set(input.ta_da);
                    active.current_balance = Set(sheet.current_balance + difference);
                    active.updated_at = Set(Utc::now());

                    let updated = active.update(txn).await.map_err(ServiceError::db_error)?;
                    Ok((updated, difference))
                })
            })
            .await
            .map_err(from_transaction_error)?;

        info!(
            "Balance sheet {} updated; difference {}, new balance {}",
            updated.id, difference, updated.current_balance
        );

        self.event_sender
            .send(Event::BalanceSheetUpdated {
                balance_sheet_id: updated.id,
                employee_id: updated.employee_id,
                difference,
                new_balance: updated.current_balance,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }
}
