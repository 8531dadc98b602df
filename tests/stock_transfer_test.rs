mod common;

use assert_matches::assert_matches;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use stockledger_api::{
    entities::{
        employee_stock::{self, Entity as EmployeeStock},
        stock_movement::{self, Entity as StockMovement, MovementType, StockableType},
        stock_transfer::{Entity as StockTransfer, TransferStatus},
        warehouse_inventory::Entity as WarehouseInventory,
    },
    errors::ServiceError,
    services::stock_transfers::{NewTransferInput, StockTransferService},
};

fn transfer_input(warehouse_id: i64, employee_id: i64, product_id: i64, qty: i32) -> NewTransferInput {
    NewTransferInput {
        warehouse_id,
        employee_id,
        product_id,
        quantity: qty,
        notes: None,
        requested_by: Some(1),
    }
}

#[tokio::test]
async fn approved_transfer_conserves_quantity_and_records_movements() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "LAPTOP-001", 0).await;
    let warehouse = common::create_warehouse_inventory(&db, 2, product.id, 50).await;

    // Employee 7 holds nothing yet
    let transfer = service
        .create_transfer(transfer_input(2, 7, product.id, 20))
        .await
        .expect("Failed to create transfer");
    assert_eq!(transfer.status, TransferStatus::Pending);

    let outcome = service
        .approve_transfer(transfer.id, 99)
        .await
        .expect("Failed to approve transfer");

    assert_eq!(outcome.warehouse_quantity, 30);
    assert_eq!(outcome.employee_quantity, 20);
    assert_eq!(outcome.transfer.status, TransferStatus::Completed);
    assert_eq!(outcome.transfer.approved_by, Some(99));
    assert!(outcome.transfer.approved_at.is_some());
    assert_eq!(outcome.movement_ids.len(), 2);

    // Counters
    let source = WarehouseInventory::find_by_id(warehouse.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.quantity, 30);

    let dest = EmployeeStock::find()
        .filter(employee_stock::Column::EmployeeId.eq(7))
        .filter(employee_stock::Column::ProductId.eq(product.id))
        .one(db.as_ref())
        .await
        .unwrap()
        .expect("employee stock row created by transfer");
    assert_eq!(dest.quantity, 20);

    // Movement pair: (50 -> 30, -20) out, (0 -> 20, +20) in
    let movements = StockMovement::find()
        .all(db.as_ref())
        .await
        .expect("Failed to query movements");
    assert_eq!(movements.len(), 2);

    let out = movements
        .iter()
        .find(|m| m.movement_type == MovementType::TransferOut)
        .expect("transfer_out movement");
    assert_eq!(out.stockable_type, StockableType::Warehouse);
    assert_eq!(out.stockable_id, 2);
    assert_eq!(out.quantity_before, 50);
    assert_eq!(out.quantity_after, 30);
    assert_eq!(out.quantity_change, -20);

    let inc = movements
        .iter()
        .find(|m| m.movement_type == MovementType::TransferIn)
        .expect("transfer_in movement");
    assert_eq!(inc.stockable_type, StockableType::Employee);
    assert_eq!(inc.stockable_id, 7);
    assert_eq!(inc.quantity_before, 0);
    assert_eq!(inc.quantity_after, 20);
    assert_eq!(inc.quantity_change, 20);
}

#[tokio::test]
async fn transfer_into_existing_employee_stock_increments() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "MOUSE-001", 0).await;
    common::create_warehouse_inventory(&db, 1, product.id, 40).await;
    let existing = common::create_employee_stock(&db, 4, product.id, 5).await;

    let transfer = service
        .create_transfer(transfer_input(1, 4, product.id, 10))
        .await
        .unwrap();
    let outcome = service.approve_transfer(transfer.id, 99).await.unwrap();

    assert_eq!(outcome.employee_quantity, 15);

    let dest = EmployeeStock::find_by_id(existing.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(dest.quantity, 15);

    let inc = StockMovement::find()
        .filter(stock_movement::Column::MovementType.eq(MovementType::TransferIn))
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(inc.quantity_before, 5);
    assert_eq!(inc.quantity_after, 15);
}

#[tokio::test]
async fn insufficient_stock_rolls_back_everything() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "KEYBOARD-001", 0).await;
    let warehouse = common::create_warehouse_inventory(&db, 3, product.id, 10).await;

    let transfer = service
        .create_transfer(transfer_input(3, 8, product.id, 20))
        .await
        .unwrap();

    let err = service.approve_transfer(transfer.id, 99).await.unwrap_err();
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // Nothing moved, nothing recorded, transfer still pending
    let source = WarehouseInventory::find_by_id(warehouse.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.quantity, 10);

    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert!(movements.is_empty());

    let reloaded = StockTransfer::find_by_id(transfer.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, TransferStatus::Pending);

    let dest = EmployeeStock::find()
        .filter(employee_stock::Column::EmployeeId.eq(8))
        .one(db.as_ref())
        .await
        .unwrap();
    assert!(dest.is_none());
}

#[tokio::test]
async fn missing_warehouse_inventory_is_not_found() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "CABLE-001", 0).await;
    let transfer = service
        .create_transfer(transfer_input(6, 2, product.id, 5))
        .await
        .unwrap();

    let err = service.approve_transfer(transfer.id, 99).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn completed_transfer_cannot_be_mutated_again() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "MONITOR-001", 0).await;
    let warehouse = common::create_warehouse_inventory(&db, 5, product.id, 100).await;

    let transfer = service
        .create_transfer(transfer_input(5, 11, product.id, 25))
        .await
        .unwrap();
    service.approve_transfer(transfer.id, 99).await.unwrap();

    // Re-approval must fail the status guard and move nothing a second time
    let err = service.approve_transfer(transfer.id, 99).await.unwrap_err();
    assert_matches!(err, ServiceError::InvalidStatus(_));

    let source = WarehouseInventory::find_by_id(warehouse.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.quantity, 75);

    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert_eq!(movements.len(), 2);

    let err = service.reject_transfer(transfer.id, 99).await.unwrap_err();
    assert_matches!(err, ServiceError::InvalidStatus(_));
    let err = service
        .cancel_transfer(transfer.id, Some("too late".to_string()))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::InvalidStatus(_));
}

#[tokio::test]
async fn cancel_appends_reason_and_moves_no_stock() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = StockTransferService::new(db.clone(), events);

    let product = common::create_test_product(&db, "DOCK-001", 0).await;
    let warehouse = common::create_warehouse_inventory(&db, 4, product.id, 30).await;

    let transfer = service
        .create_transfer(NewTransferInput {
            notes: Some("urgent".to_string()),
            ..transfer_input(4, 6, product.id, 10)
        })
        .await
        .unwrap();

    let cancelled = service
        .cancel_transfer(transfer.id, Some("requested in error".to_string()))
        .await
        .expect("Failed to cancel transfer");

    assert_eq!(cancelled.status, TransferStatus::Cancelled);
    assert_eq!(
        cancelled.notes.as_deref(),
        Some("urgent\nCancelled: requested in error")
    );

    let source = WarehouseInventory::find_by_id(warehouse.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.quantity, 30);

    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert!(movements.is_empty());
}
