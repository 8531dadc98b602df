use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Creates a sender/receiver pair with the given channel capacity.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let payload = serde_json::to_string(&event).unwrap_or_default();
            tracing::debug!(event = %payload, "publishing event");
        }
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// Define the various events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Ledger events
    ExpenseRecorded {
        expense_id: i64,
        employee_id: i64,
        amount: Decimal,
    },
    ExpenseAmountChanged {
        expense_id: i64,
        employee_id: i64,
        old_amount: Decimal,
        new_amount: Decimal,
    },
    ExpenseReversed {
        expense_id: i64,
        employee_id: i64,
        amount: Decimal,
    },
    ExpenseApproved {
        expense_id: i64,
        approved_by: i64,
    },
    DeliveryRecorded {
        delivery_id: i64,
        employee_id: i64,
        product_id: i64,
        total_amount: Decimal,
    },
    DeliveryAmountChanged {
        delivery_id: i64,
        employee_id: i64,
        old_total: Decimal,
        new_total: Decimal,
    },
    DeliveryReversed {
        delivery_id: i64,
        employee_id: i64,
        total_amount: Decimal,
    },
    BalanceSheetUpdated {
        balance_sheet_id: i64,
        employee_id: i64,
        difference: Decimal,
        new_balance: Decimal,
    },

    // Stock events
    StockTransferCompleted {
        transfer_id: i64,
        warehouse_id: i64,
        employee_id: i64,
        product_id: i64,
        quantity: i32,
    },
    StockTransferRejected {
        transfer_id: i64,
    },
    StockTransferCancelled {
        transfer_id: i64,
    },
    ProductAdjustmentApproved {
        adjustment_id: i64,
        product_id: i64,
        previous_quantity: i32,
        new_quantity: i32,
    },
    ProductAdjustmentRejected {
        adjustment_id: i64,
    },
    PartialAdjustmentWarning {
        adjustment_id: i64,
        product_id: i64,
        requested_quantity: i32,
        quantity_adjusted: i32,
    },
    EmployeeStockAdjusted {
        employee_stock_id: i64,
        product_id: i64,
        quantity_change: i32,
    },

    // Generic event data
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
    },
}
