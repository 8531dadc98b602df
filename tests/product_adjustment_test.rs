mod common;

use assert_matches::assert_matches;
use sea_orm::EntityTrait;
use stockledger_api::{
    entities::{
        product::Entity as Product,
        product_adjustment::{AdjustmentDirection, AdjustmentStatus},
        stock_movement::{Entity as StockMovement, MovementType, StockableType},
    },
    errors::ServiceError,
    events::Event,
    services::{
        employee_stocks::{EmployeeStockService, UpdateStockInput},
        product_adjustments::{NewAdjustmentInput, ProductAdjustmentService},
    },
};

fn adjustment_input(
    product_id: i64,
    direction: AdjustmentDirection,
    quantity: i32,
) -> NewAdjustmentInput {
    NewAdjustmentInput {
        product_id,
        direction,
        quantity,
        reason: Some("cycle count".to_string()),
        requested_by: Some(1),
    }
}

#[tokio::test]
async fn decrease_clamps_at_zero_and_records_effective_magnitude() {
    let db = common::setup_db().await;
    let (events, mut rx) = common::test_event_sender();
    let service = ProductAdjustmentService::new(db.clone(), events);

    let product = common::create_test_product(&db, "CLAMP-001", 5).await;

    let adjustment = service
        .create_adjustment(adjustment_input(
            product.id,
            AdjustmentDirection::Decrease,
            8,
        ))
        .await
        .expect("Failed to create adjustment");

    assert_eq!(adjustment.previous_quantity, 5);
    assert_eq!(adjustment.new_quantity, 0);
    assert_eq!(adjustment.quantity_requested, 8);
    assert_eq!(adjustment.quantity_adjusted, 5);
    assert!(adjustment.is_partial());

    // Caller is warned that the effective adjustment shrank
    let event = rx.recv().await.expect("warning event emitted");
    assert_matches!(
        event,
        Event::PartialAdjustmentWarning {
            requested_quantity: 8,
            quantity_adjusted: 5,
            ..
        }
    );
}

#[tokio::test]
async fn approval_applies_precomputed_quantity_with_one_movement() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = ProductAdjustmentService::new(db.clone(), events);

    let product = common::create_test_product(&db, "ADJ-001", 12).await;

    let adjustment = service
        .create_adjustment(adjustment_input(
            product.id,
            AdjustmentDirection::Increase,
            8,
        ))
        .await
        .unwrap();
    assert_eq!(adjustment.status, AdjustmentStatus::Pending);
    assert_eq!(adjustment.new_quantity, 20);

    let outcome = service
        .approve_adjustment(adjustment.id, 42)
        .await
        .expect("Failed to approve adjustment");

    assert_eq!(outcome.stock_quantity, 20);
    assert_eq!(outcome.adjustment.status, AdjustmentStatus::Approved);
    assert_eq!(outcome.adjustment.approved_by, Some(42));

    let reloaded = Product::find_by_id(product.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.stock_quantity, 20);

    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert_eq!(movements.len(), 1);
    let movement = &movements[0];
    assert_eq!(movement.id, outcome.movement_id);
    assert_eq!(movement.stockable_type, StockableType::Product);
    assert_eq!(movement.movement_type, MovementType::Adjustment);
    assert_eq!(movement.quantity_before, 12);
    assert_eq!(movement.quantity_after, 20);
    assert_eq!(movement.quantity_change, 8);
}

#[tokio::test]
async fn terminal_adjustments_reject_further_transitions() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = ProductAdjustmentService::new(db.clone(), events);

    let product = common::create_test_product(&db, "ADJ-002", 10).await;

    let adjustment = service
        .create_adjustment(adjustment_input(
            product.id,
            AdjustmentDirection::Decrease,
            4,
        ))
        .await
        .unwrap();
    service.approve_adjustment(adjustment.id, 42).await.unwrap();

    // Approved is terminal for adjustments
    let err = service.approve_adjustment(adjustment.id, 42).await.unwrap_err();
    assert_matches!(err, ServiceError::InvalidStatus(_));
    let err = service.reject_adjustment(adjustment.id, 42).await.unwrap_err();
    assert_matches!(err, ServiceError::InvalidStatus(_));

    // The counter moved exactly once
    let reloaded = Product::find_by_id(product.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.stock_quantity, 6);
    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert_eq!(movements.len(), 1);
}

#[tokio::test]
async fn rejection_moves_no_stock() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = ProductAdjustmentService::new(db.clone(), events);

    let product = common::create_test_product(&db, "ADJ-003", 10).await;

    let adjustment = service
        .create_adjustment(adjustment_input(
            product.id,
            AdjustmentDirection::Decrease,
            3,
        ))
        .await
        .unwrap();

    let rejected = service
        .reject_adjustment(adjustment.id, 42)
        .await
        .expect("Failed to reject adjustment");
    assert_eq!(rejected.status, AdjustmentStatus::Rejected);

    let reloaded = Product::find_by_id(product.id)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.stock_quantity, 10);
    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert!(movements.is_empty());
}

#[tokio::test]
async fn adjusting_a_missing_product_is_not_found() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = ProductAdjustmentService::new(db.clone(), events);

    let err = service
        .create_adjustment(adjustment_input(777, AdjustmentDirection::Increase, 1))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn manual_stock_update_always_writes_a_movement() {
    let db = common::setup_db().await;
    let (events, _rx) = common::test_event_sender();
    let service = EmployeeStockService::new(db.clone(), events);

    let product = common::create_test_product(&db, "STOCK-001", 0).await;
    let stock = common::create_employee_stock(&db, 3, product.id, 10).await;

    let outcome = service
        .update_stock(
            stock.id,
            UpdateStockInput {
                quantity: 10,
                minimum_quantity: 2,
                maximum_quantity: Some(50),
                notes: Some("recount, no change".to_string()),
                updated_by: Some(7),
            },
        )
        .await
        .expect("Failed to update stock");

    // Zero change still produces an audit row
    assert_eq!(outcome.quantity_change, 0);
    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity_before, 10);
    assert_eq!(movements[0].quantity_after, 10);
    assert_eq!(movements[0].movement_type, MovementType::Adjustment);

    let outcome = service
        .update_stock(
            stock.id,
            UpdateStockInput {
                quantity: 4,
                minimum_quantity: 2,
                maximum_quantity: Some(50),
                notes: None,
                updated_by: Some(7),
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome.quantity_change, -6);
    assert_eq!(outcome.stock.quantity, 4);

    let movements = StockMovement::find().all(db.as_ref()).await.unwrap();
    assert_eq!(movements.len(), 2);
}
