use rust_decimal::Decimal;

use furniture_domain::order::{OrderStatus, OrderType, PaymentStatus, SYSTEM_ACTOR};
use furniture_store::error::StoreServiceError;
use furniture_store::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, UpdateOrderInput,
    UpdateOrderUseCase,
};

use crate::helpers::{MockOrderRepo, customer, item, pending_order};

fn create_input(user_id: Option<i32>) -> CreateOrderInput {
    CreateOrderInput {
        order_type: OrderType::Purchase,
        customer: customer(user_id),
        consultation_details: None,
        total_amount: None,
        status: None,
        payment_status: None,
        payment_method: None,
        notes: None,
        staff_notes: None,
        assigned_staff_id: None,
        items: vec![item(1, 2, 1999), item(2, 1, 500)],
    }
}

// ── CreateOrderUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_order_with_items_and_initial_history() {
    let repo = MockOrderRepo::empty();
    let handle = repo.orders_handle();
    let usecase = CreateOrderUseCase { repo };

    let created = usecase.execute(create_input(Some(7))).await.unwrap();

    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.payment_status, PaymentStatus::Unpaid);
    assert_eq!(created.total_amount, Decimal::new(4498, 2));
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.status_history.len(), 1);
    assert_eq!(created.status_history[0].status, OrderStatus::Pending);
    assert_eq!(created.status_history[0].updated_by, "7");
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_record_system_actor_for_guest_order() {
    let usecase = CreateOrderUseCase {
        repo: MockOrderRepo::empty(),
    };

    let created = usecase.execute(create_input(None)).await.unwrap();

    assert_eq!(created.status_history[0].updated_by, SYSTEM_ACTOR);
}

#[tokio::test]
async fn should_accept_consultation_order_without_items() {
    let usecase = CreateOrderUseCase {
        repo: MockOrderRepo::empty(),
    };

    let mut input = create_input(None);
    input.order_type = OrderType::Consultation;
    input.items = vec![];
    let created = usecase.execute(input).await.unwrap();

    assert!(created.items.is_empty());
    assert_eq!(created.total_amount, Decimal::ZERO);
}

// ── UpdateOrderUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_append_history_once_per_status_change() {
    let repo = MockOrderRepo::new(vec![pending_order(1)]);
    let usecase = UpdateOrderUseCase { repo };

    let confirmed = usecase
        .execute(
            1,
            UpdateOrderInput {
                status: Some(OrderStatus::Confirmed),
                assigned_staff_id: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(confirmed.status_history.len(), 2);
    let last = confirmed.status_history.last().unwrap();
    assert_eq!(last.status, OrderStatus::Confirmed);
    assert_eq!(last.updated_by, "3");

    let unchanged = usecase
        .execute(
            1,
            UpdateOrderInput {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged.status_history.len(), 2);
}

#[tokio::test]
async fn should_allow_any_status_transition() {
    let mut completed = pending_order(1);
    completed.status = OrderStatus::Completed;
    let usecase = UpdateOrderUseCase {
        repo: MockOrderRepo::new(vec![completed]),
    };

    let reopened = usecase
        .execute(
            1,
            UpdateOrderInput {
                status: Some(OrderStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(reopened.status, OrderStatus::Pending);
    assert_eq!(
        reopened.status_history.last().unwrap().updated_by,
        SYSTEM_ACTOR
    );
}

#[tokio::test]
async fn should_replace_items_and_recompute_total() {
    let repo = MockOrderRepo::new(vec![pending_order(1)]);
    let handle = repo.orders_handle();
    let usecase = UpdateOrderUseCase { repo };

    let updated = usecase
        .execute(
            1,
            UpdateOrderInput {
                items: Some(vec![item(3, 3, 1500)]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.items[0].product_id, 3);
    assert_eq!(updated.total_amount, Decimal::new(4500, 2));
    assert_eq!(updated.status_history.len(), 1);
    assert_eq!(handle.lock().unwrap()[0].items.len(), 1);
}

#[tokio::test]
async fn should_keep_items_when_not_given() {
    let usecase = UpdateOrderUseCase {
        repo: MockOrderRepo::new(vec![pending_order(1)]),
    };

    let updated = usecase
        .execute(
            1,
            UpdateOrderInput {
                payment_status: Some(PaymentStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert_eq!(updated.items.len(), 2);
    assert_eq!(updated.total_amount, Decimal::new(2500, 2));
}

// ── GetOrderUseCase / DeleteOrderUseCase ─────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_order() {
    let get = GetOrderUseCase {
        repo: MockOrderRepo::empty(),
    };
    assert!(matches!(
        get.execute(1).await,
        Err(StoreServiceError::OrderNotFound)
    ));

    let delete = DeleteOrderUseCase {
        repo: MockOrderRepo::empty(),
    };
    assert!(matches!(
        delete.execute(1).await,
        Err(StoreServiceError::OrderNotFound)
    ));
}
