use crate::{
    db::DbPool,
    entities::expense::{self, Entity as Expense, ExpenseStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    services::balance_sheets::BalanceSheetService,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};
use std::sync::Arc;
use tracing::info;

/// Expense lifecycle service.
///
/// The balance deduction happens when the expense is recorded. As in the
/// system this replaces, the expense row write and the balance mutation
/// are two sequential statements, not one transaction; the balance
/// mutation itself is transactional.
pub struct ExpenseService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    balance_sheets: Arc<BalanceSheetService>,
}

#[derive(Debug, Clone)]
pub struct NewExpenseInput {
    pub employee_id: i64,
    /// Non-negative; range-validated by the caller.
    pub amount: Decimal,
    pub category: Option<String>,
    pub expense_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub expense_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Mutated expense row plus the employee's balance after the operation.
#[derive(Debug, Clone)]
pub struct ExpenseOutcome {
    pub expense: expense::Model,
    pub current_balance: Decimal,
}

impl ExpenseService {
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

    async fn find_expense(&self, id: i64) -> Result<expense::Model, ServiceError> {
        Expense::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::NotFound(format!("Expense {} not found", id)))
    }

    /// Records an expense and deducts its amount from the employee's
    /// running balance.
    pub async fn create_expense(
        &self,
        input: NewExpenseInput,
    ) -> Result<ExpenseOutcome, ServiceError> {
        let now = Utc::now();
        let row = expense::ActiveModel {
            employee_id: Set(input.employee_id),
            amount: Set(input.amount),
            category: Set(input.category),
            expense_date: Set(input.expense_date),
            notes: Set(input.notes),
            status: Set(ExpenseStatus::Pending),
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
            .apply_delta(created.employee_id, -created.amount)
            .await?;

        info!(
            "Recorded expense {} of {} for employee {}",
            created.id, created.amount, created.employee_id
        );

        self.event_sender
            .send(Event::ExpenseRecorded {
                expense_id: created.id,
                employee_id: created.employee_id,
                amount: created.amount,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(ExpenseOutcome {
            expense: created,
            current_balance: sheet.current_balance,
        })
    }

    /// Edits an expense. An amount change is applied to the balance as one
    /// combined delta (`old - new`), never as a reversal plus a
    /// re-application.
    pub async fn update_expense(
        &self,
        id: i64,
        input: UpdateExpenseInput,
    ) -> Result<ExpenseOutcome, ServiceError> {
        let existing = self.find_expense(id).await?;

        if existing.status.is_terminal() {
            return Err(ServiceError::InvalidStatus(format!(
                "Expense {} is {} and can no longer be edited",
                id, existing.status
            )));
        }

        let old_amount = existing.amount;
        let new_amount = input.amount.unwrap_or(old_amount);

        let mut active: expense::ActiveModel = existing.clone().into();
        active.amount = Set(new_amount);
        if let Some(category) = input.category {
            active.category = Set(Some(category));
        }
        if let Some(expense_date) = input.expense_date {
            active.expense_date = Set(expense_date);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let sheet = if new_amount != old_amount {
            let sheet = self
                .balance_sheets
                .apply_delta(updated.employee_id, old_amount - new_amount)
                .await?;

            self.event_sender
                .send(Event::ExpenseAmountChanged {
                    expense_id: updated.id,
                    employee_id: updated.employee_id,
                    old_amount,
                    new_amount,
                })
                .await
                .map_err(ServiceError::EventError)?;

            sheet
        } else {
            BalanceSheetService::get_or_create(self.db_pool.as_ref(), updated.employee_id).await?
        };

        Ok(ExpenseOutcome {
            expense: updated,
            current_balance: sheet.current_balance,
        })
    }

    /// Deletes an expense, restoring its amount to the balance. A rejected
    /// expense was already reversed at rejection and is not reversed again.
    pub async fn delete_expense(&self, id: i64) -> Result<Decimal, ServiceError> {
        let existing = self.find_expense(id).await?;
        let was_rejected = existing.status == ExpenseStatus::Rejected;
        let employee_id = existing.employee_id;
        let amount = existing.amount;

        existing
            .clone()
            .delete(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let balance = if was_rejected {
            BalanceSheetService::get_or_create(self.db_pool.as_ref(), employee_id)
                .await?
                .current_balance
        } else {
            let sheet = self.balance_sheets.apply_delta(employee_id, amount).await?;

            self.event_sender
                .send(Event::ExpenseReversed {
                    expense_id: id,
                    employee_id,
                    amount,
                })
                .await
                .map_err(ServiceError::EventError)?;

            sheet.current_balance
        };

        info!("Deleted expense {} for employee {}", id, employee_id);

        Ok(balance)
    }

    /// Approves a pending expense. The balance was already deducted at
    /// creation, so this only advances the workflow.
    pub async fn approve_expense(
        &self,
        id: i64,
        approved_by: i64,
    ) -> Result<expense::Model, ServiceError> {
        let existing = self.find_expense(id).await?;

        if !existing.status.can_transition_to(ExpenseStatus::Approved) {
            return Err(ServiceError::InvalidStatus(format!(
                "Expense {} is {} and cannot be approved",
                id, existing.status
            )));
        }

        let mut active: expense::ActiveModel = existing.into();
        active.status = Set(ExpenseStatus::Approved);
        active.approved_by = Set(Some(approved_by));
        active.approved_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::ExpenseApproved {
                expense_id: updated.id,
                approved_by,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }

    /// Rejects an expense and reverses its deduction exactly once.
    /// Rejected is terminal; a second rejection fails the status guard.
    pub async fn reject_expense(
        &self,
        id: i64,
        rejected_by: i64,
    ) -> Result<ExpenseOutcome, ServiceError> {
        let existing = self.find_expense(id).await?;

        if !existing.status.can_transition_to(ExpenseStatus::Rejected) {
            return Err(ServiceError::InvalidStatus(format!(
                "Expense {} is {} and cannot be rejected",
                id, existing.status
            )));
        }

        let employee_id = existing.employee_id;
        let amount = existing.amount;

        let mut active: expense::ActiveModel = existing.into();
        active.status = Set(ExpenseStatus::Rejected);
        active.approved_by = Set(Some(rejected_by));
        active.approved_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        let sheet = self.balance_sheets.apply_delta(employee_id, amount).await?;

        info!(
            "Rejected expense {} for employee {}; reversed {}",
            id, employee_id, amount
        );

        self.event_sender
            .send(Event::ExpenseReversed {
                expense_id: updated.id,
                employee_id,
                amount,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(ExpenseOutcome {
            expense: updated,
            current_balance: sheet.current_balance,
        })
    }
}
