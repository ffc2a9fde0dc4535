//! Tests for the in-memory stores used by the HTTP tests

use proptest::prelude::*;

use core_kernel::{EmployeeId, HealthCheckable, ProductId};
use domain_employee::EmployeeStore;
use domain_product::{ProductFilter, ProductStore};
use test_utils::{
    assert_created_from, employee_strategy, product_strategy, EmployeeFixtures, InMemoryEmployeeStore,
    InMemoryProductStore, ProductFixtures,
};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
}

#[tokio::test]
async fn test_identifiers_are_sequential() {
    let store = InMemoryEmployeeStore::new();

    let first = store.create_employee(EmployeeFixtures::ada()).await.unwrap();
    let second = store.create_employee(EmployeeFixtures::grace()).await.unwrap();

    assert_eq!(first.id, Some(EmployeeId::new(1)));
    assert_eq!(second.id, Some(EmployeeId::new(2)));
}

#[tokio::test]
async fn test_seed_moves_the_counter_past_the_seeded_id() {
    let store = InMemoryProductStore::new();
    store.seed(10, ProductFixtures::widget()).await;

    let created = store.create_product(ProductFixtures::handbook()).await.unwrap();

    assert_eq!(created.id, Some(ProductId::new(11)));
}

#[tokio::test]
async fn test_failing_creates_leave_store_untouched() {
    let store = InMemoryEmployeeStore::new();
    store.fail_creates(true);

    let err = store.create_employee(EmployeeFixtures::ada()).await.unwrap_err();

    assert!(err.is_creation_failure());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_missing_rows_are_not_found() {
    let store = InMemoryProductStore::new();
    let missing = ProductId::new(9999);

    assert!(store.get_product(missing).await.unwrap_err().is_not_found());
    assert!(store
        .update_product(missing, ProductFixtures::widget())
        .await
        .unwrap_err()
        .is_not_found());
    assert!(store.delete_product(missing).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_filter_matches_postgres_semantics() {
    let store = InMemoryProductStore::new();
    store.seed(1, ProductFixtures::widget()).await;
    store.seed(2, ProductFixtures::retired_gadget()).await;
    let mut uncategorized = ProductFixtures::handbook();
    uncategorized.category = None;
    store.seed(3, uncategorized).await;

    let tools = store.list_products_filtered(&ProductFilter::by_category("tools")).await.unwrap();
    assert_eq!(tools.len(), 2);

    let active = store
        .list_products_filtered(&ProductFilter::default().with_active(true))
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn test_health_can_be_toggled() {
    let store = InMemoryEmployeeStore::new();
    assert!(store.health_check().await.is_ok());

    store.set_unhealthy(true);
    assert!(store.health_check().await.is_err());
}

proptest! {
    #[test]
    fn prop_employee_create_then_get(employee in employee_strategy()) {
        runtime().block_on(async {
            let store = InMemoryEmployeeStore::new();
            let created = store.create_employee(employee.clone()).await.unwrap();
            let id = assert_created_from(&created, &employee);

            let fetched = store.get_employee(EmployeeId::new(id)).await.unwrap();
            assert_eq!(fetched, created);
        });
    }

    #[test]
    fn prop_product_update_is_idempotent(original in product_strategy(), change in product_strategy()) {
        runtime().block_on(async {
            let store = InMemoryProductStore::new();
            let id = store.create_product(original).await.unwrap().id.unwrap();

            let first = store.update_product(id, change.clone()).await.unwrap();
            let second = store.update_product(id, change).await.unwrap();

            assert_eq!(first, second);
            assert_eq!(store.get_product(id).await.unwrap(), second);
        });
    }
}
