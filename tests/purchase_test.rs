use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use petstore_buyer::clients::mock::{MockInventory, MockOrders};
use petstore_buyer::clients::{InventoryService, OrderService, ServiceError};
use petstore_buyer::model::{Order, Pet, PetId};
use petstore_buyer::{CancelHandle, Context, PurchaseError, PurchaseOrchestrator};

fn buyer(
    inventory: &MockInventory,
    orders: &MockOrders,
) -> PurchaseOrchestrator<MockInventory, MockOrders> {
    PurchaseOrchestrator::new(inventory.clone(), orders.clone())
}

/// Pet 1 is available and the store assigns order 10.
#[tokio::test]
async fn test_buy_available_pet_returns_order_id() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(1).return_ok(Pet::new(1, "available"));
    orders.expect_place_order(1).return_ok(Order::new(10, 1));

    let order_id = buyer(&inventory, &orders)
        .buy(&Context::background(), 1)
        .await
        .expect("purchase should succeed");

    assert_eq!(order_id, 10);
    assert_eq!(inventory.calls(), vec![1]);
    assert_eq!(orders.calls(), vec![1]);
    inventory.verify();
    orders.verify();
}

/// Pet 2 is pending, so the store is never called.
#[tokio::test]
async fn test_buy_pending_pet_is_rejected() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(2).return_ok(Pet::new(2, "pending"));

    let result = buyer(&inventory, &orders).buy(&Context::background(), 2).await;

    assert!(matches!(result, Err(PurchaseError::NotAvailable)));
    assert_eq!(orders.call_count(), 0);
    inventory.verify();
}

#[tokio::test]
async fn test_any_status_but_available_is_rejected() {
    let mut statuses: Vec<Option<&str>> = [
        "pending",
        "sold",
        "",
        "Available",
        " available",
        "available\n",
        "reserved",
    ]
    .into_iter()
    .map(Some)
    .collect();
    statuses.push(None);

    for status in statuses {
        let inventory = MockInventory::new();
        let orders = MockOrders::new();
        let mut pet = Pet::new(3, "");
        pet.status = status.map(str::to_string);
        inventory.expect_get_pet(3).return_ok(pet);

        let result = buyer(&inventory, &orders).buy(&Context::background(), 3).await;

        assert!(
            matches!(result, Err(PurchaseError::NotAvailable)),
            "status {status:?} gave {result:?}"
        );
        assert_eq!(orders.call_count(), 0, "status {status:?} reached the store");
    }
}

#[tokio::test]
async fn test_lookup_failure_skips_order() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory
        .expect_get_pet(404)
        .return_err(ServiceError::Unavailable("pet not found".to_string()));

    let err = buyer(&inventory, &orders)
        .buy(&Context::background(), 404)
        .await
        .unwrap_err();

    match err {
        PurchaseError::LookupFailed { pet_id, ref source } => {
            assert_eq!(pet_id, 404);
            assert!(matches!(source, ServiceError::Unavailable(msg) if msg == "pet not found"));
        }
        other => panic!("Expected LookupFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("404"));
    assert_eq!(orders.call_count(), 0);
}

#[tokio::test]
async fn test_order_failure_is_wrapped() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(1).return_ok(Pet::new(1, "available"));
    orders
        .expect_place_order(1)
        .return_err(ServiceError::Unavailable("store closed".to_string()));

    let err = buyer(&inventory, &orders)
        .buy(&Context::background(), 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PurchaseError::OrderFailed { pet_id: 1, source: ServiceError::Unavailable(_) }
    ));
    inventory.verify();
    orders.verify();
}

#[tokio::test]
async fn test_order_references_pet_id_from_inventory() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(5).return_ok(Pet::new(6, "available"));
    orders
        .expect_place_order(6)
        .return_err(ServiceError::Unavailable("store closed".to_string()));

    let err = buyer(&inventory, &orders)
        .buy(&Context::background(), 5)
        .await
        .unwrap_err();

    assert_eq!(orders.calls(), vec![6]);
    assert_eq!(err.pet_id(), Some(6));
}

#[tokio::test]
async fn test_cancel_during_lookup_returns_promptly() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(1).return_pending();

    let (ctx, handle) = Context::background().with_cancel();
    let subject = buyer(&inventory, &orders);
    let task = tokio::spawn(async move { subject.buy(&ctx, 1).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("buy should return promptly after cancel")
        .unwrap();

    assert!(matches!(result, Err(PurchaseError::Cancelled)));
    assert_eq!(orders.call_count(), 0);
}

#[tokio::test]
async fn test_cancelled_context_makes_no_calls() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();

    let (ctx, handle) = Context::background().with_cancel();
    handle.cancel();

    let result = buyer(&inventory, &orders).buy(&ctx, 1).await;

    assert!(matches!(result, Err(PurchaseError::Cancelled)));
    assert_eq!(inventory.call_count(), 0);
    assert_eq!(orders.call_count(), 0);
}

#[tokio::test]
async fn test_deadline_during_order_placement() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(1).return_ok(Pet::new(1, "available"));
    orders.expect_place_order(1).return_pending();

    let ctx = Context::background().with_timeout(Duration::from_millis(50));
    let subject = buyer(&inventory, &orders);
    let result = tokio::time::timeout(Duration::from_secs(1), subject.buy(&ctx, 1))
        .await
        .expect("buy should stop at the deadline");

    assert!(matches!(result, Err(PurchaseError::DeadlineExceeded)));
    assert!(result.unwrap_err().is_interrupted());
}

#[tokio::test]
async fn test_cancel_during_order_placement() {
    let inventory = MockInventory::new();
    let orders = MockOrders::new();
    inventory.expect_get_pet(1).return_ok(Pet::new(1, "available"));
    orders.expect_place_order(1).return_pending();

    let (ctx, handle) = Context::background().with_cancel();
    let subject = buyer(&inventory, &orders);
    let task = tokio::spawn(async move { subject.buy(&ctx, 1).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("buy should return promptly after cancel")
        .unwrap();

    assert!(matches!(result, Err(PurchaseError::Cancelled)));
    assert_eq!(inventory.calls(), vec![1]);
    assert_eq!(orders.calls(), vec![1]);
    inventory.verify();
    orders.verify();
}

/// Inventory that cancels the caller's context and then fails.
struct CancellingInventory {
    handle: CancelHandle,
}

#[async_trait]
impl InventoryService for CancellingInventory {
    async fn get_pet(&self, _ctx: &Context, _pet_id: PetId) -> Result<Pet, ServiceError> {
        self.handle.cancel();
        Err(ServiceError::Unavailable("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_context_error_wins_over_collaborator_error() {
    let (ctx, handle) = Context::background().with_cancel();
    let subject = PurchaseOrchestrator::new(CancellingInventory { handle }, MockOrders::new());

    let result = subject.buy(&ctx, 1).await;
    assert!(matches!(result, Err(PurchaseError::Cancelled)));
}

/// Both collaborators backed by one in-memory store.
#[derive(Clone, Default)]
struct InMemoryPetstore {
    pets: Arc<HashMap<PetId, Pet>>,
    next_order_id: Arc<AtomicI64>,
}

#[async_trait]
impl InventoryService for InMemoryPetstore {
    async fn get_pet(&self, _ctx: &Context, pet_id: PetId) -> Result<Pet, ServiceError> {
        self.pets
            .get(&pet_id)
            .cloned()
            .ok_or_else(|| ServiceError::Unavailable(format!("no pet {pet_id}")))
    }
}

#[async_trait]
impl OrderService for InMemoryPetstore {
    async fn place_order(&self, _ctx: &Context, pet_id: PetId) -> Result<Order, ServiceError> {
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Order::new(id, pet_id))
    }
}

/// Concurrent purchases share one orchestrator without interfering.
#[tokio::test]
async fn test_concurrent_purchases() {
    let pets: HashMap<PetId, Pet> = (1..=20)
        .map(|id| {
            let status = if id % 2 == 0 { "available" } else { "sold" };
            (id, Pet::new(id, status))
        })
        .collect();
    let store = InMemoryPetstore {
        pets: Arc::new(pets),
        ..Default::default()
    };
    let subject = PurchaseOrchestrator::new(store.clone(), store.clone());

    let mut handles = vec![];
    for id in 1..=20 {
        let subject = subject.clone();
        handles.push(tokio::spawn(async move {
            (id, subject.buy(&Context::background(), id).await)
        }));
    }

    let mut order_ids = vec![];
    for handle in handles {
        let (id, result) = handle.await.unwrap();
        if id % 2 == 0 {
            order_ids.push(result.expect("even pets are available"));
        } else {
            assert!(matches!(result, Err(PurchaseError::NotAvailable)));
        }
    }

    order_ids.sort_unstable();
    assert_eq!(order_ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(store.next_order_id.load(Ordering::SeqCst), 10);
}
