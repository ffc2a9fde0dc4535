//! HTTP tests for the employee and product resources
//!
//! The router runs against in-memory stores through axum-test; no database
//! or socket is involved.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_employee::Employee;
use domain_product::Product;
use interface_api::config::ApiConfig;
use interface_api::error::ErrorResponse;
use interface_api::handlers::health::HealthResponse;
use interface_api::{create_router, AppState};
use test_utils::{
    assert_created_from, EmployeeBuilder, EmployeeFixtures, InMemoryEmployeeStore, InMemoryProductStore,
    ProductFixtures,
};

struct Harness {
    server: TestServer,
    employees: Arc<InMemoryEmployeeStore>,
    products: Arc<InMemoryProductStore>,
}

fn harness_with(config: ApiConfig) -> Harness {
    let employees = Arc::new(InMemoryEmployeeStore::new());
    let products = Arc::new(InMemoryProductStore::new());
    let state = AppState::new(config)
        .with_employee_store(employees.clone())
        .with_product_store(products.clone());

    Harness {
        server: TestServer::new(create_router(state)).unwrap(),
        employees,
        products,
    }
}

fn harness() -> Harness {
    harness_with(ApiConfig::default())
}

fn degraded_server() -> TestServer {
    TestServer::new(create_router(AppState::new(ApiConfig::default()))).unwrap()
}

mod employee_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_ada_returns_201_with_id() {
        let h = harness();

        let response = h
            .server
            .post("/api/employees")
            .json(&json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@x.io",
                "departmentId": "ENG",
                "hireDate": "2020-01-01"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Employee = response.json();
        let id = assert_created_from(&created, &EmployeeFixtures::ada());

        let body: Value = response.json();
        assert_eq!(body["id"], json!(id));
        assert_eq!(body["departmentId"], json!("ENG"));
    }

    #[tokio::test]
    async fn test_create_ignores_submitted_id() {
        let h = harness();
        h.employees.seed(1, EmployeeFixtures::grace()).await;

        let response = h
            .server
            .post("/api/employees")
            .json(&json!({ "id": 1, "firstName": "Ada" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: Employee = response.json();
        assert_eq!(created.id.map(|id| id.value()), Some(2));
        assert_eq!(h.employees.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let h = harness();
        let input = EmployeeBuilder::new().build();

        let created: Employee = h.server.post("/api/employees").json(&input).await.json();
        let id = created.id.map(|id| id.value()).unwrap();

        let fetched: Employee = h.server.get(&format!("/api/employees/{id}")).await.json();
        assert_created_from(&fetched, &input);
    }

    #[tokio::test]
    async fn test_list_matches_individual_gets() {
        let h = harness();
        h.employees.seed(1, EmployeeFixtures::ada()).await;
        h.employees.seed(2, EmployeeFixtures::grace()).await;

        let listed: Vec<Employee> = h.server.get("/api/employees").await.json();
        assert_eq!(listed.len(), 2);

        for employee in listed {
            let id = employee.id.map(|id| id.value()).unwrap();
            let fetched: Employee = h.server.get(&format!("/api/employees/{id}")).await.json();
            assert_eq!(fetched, employee);
        }
    }

    #[tokio::test]
    async fn test_empty_list_is_array() {
        let h = harness();

        let response = h.server.get("/api/employees").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_unset_fields_are_null() {
        let h = harness();
        h.employees.seed(4, EmployeeFixtures::sparse()).await;

        let body: Value = h.server.get("/api/employees/4").await.json();

        assert_eq!(body["lastName"], json!("Nobody"));
        assert_eq!(body["email"], Value::Null);
        assert_eq!(body["hireDate"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let h = harness();
        h.employees.seed(3, EmployeeFixtures::ada()).await;

        let response = h
            .server
            .put("/api/employees/3")
            .json(&json!({ "firstName": "Augusta", "lastName": "King" }))
            .await;

        response.assert_status_ok();
        let updated: Employee = response.json();
        assert_eq!(updated.id.map(|id| id.value()), Some(3));
        assert_eq!(updated.first_name.as_deref(), Some("Augusta"));
        assert_eq!(updated.email, None);
    }

    #[tokio::test]
    async fn test_update_twice_is_idempotent() {
        let h = harness();
        h.employees.seed(3, EmployeeFixtures::ada()).await;
        let body = json!({ "firstName": "Ada", "lastName": "Byron", "email": "ada@x.io" });

        let first: Employee = h.server.put("/api/employees/3").json(&body).await.json();
        let second: Employee = h.server.put("/api/employees/3").json(&body).await.json();

        assert_eq!(first, second);
        let stored: Employee = h.server.get("/api/employees/3").await.json();
        assert_eq!(stored, second);
    }

    #[tokio::test]
    async fn test_delete_twice_returns_204_then_404() {
        let h = harness();
        h.employees.seed(3, EmployeeFixtures::ada()).await;

        h.server.delete("/api/employees/3").await.assert_status(StatusCode::NO_CONTENT);
        h.server.delete("/api/employees/3").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_unknown_id_is_404_for_get_update_delete() {
        let h = harness();

        h.server.get("/api/employees/77").await.assert_status_not_found();
        h.server
            .put("/api/employees/77")
            .json(&json!({ "firstName": "Nobody" }))
            .await
            .assert_status_not_found();
        h.server.delete("/api/employees/77").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let h = harness();

        let body: ErrorResponse = h.server.get("/api/employees/77").await.json();

        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Employee not found with id: 77");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let h = harness();

        let response = h.server.get("/api/employees/abc").await;

        response.assert_status_bad_request();
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "bad_request");
    }
}

mod product_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_product_is_404() {
        let h = harness();

        let response = h.server.get("/api/products/9999").await;

        response.assert_status_not_found();
        let body: ErrorResponse = response.json();
        assert_eq!(body.message, "Product not found with id: 9999");
    }

    #[tokio::test]
    async fn test_update_price_keeps_other_fields() {
        let h = harness();
        h.products.seed(5, ProductFixtures::widget()).await;
        let current: Value = h.server.get("/api/products/5").await.json();
        assert_eq!(current["price"], json!(10.0));

        let mut body = current.clone();
        body["price"] = json!(12.5);
        let response = h.server.put("/api/products/5").json(&body).await;

        response.assert_status_ok();
        let updated: Product = response.json();
        assert_eq!(updated.price, Some(dec!(12.5)));
        assert_eq!(updated.name.as_deref(), Some("Widget"));
        assert_eq!(updated.stock, Some(40));

        let stored: Product = h.server.get("/api/products/5").await.json();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_price_is_a_json_number() {
        let h = harness();

        let response = h.server.post("/api/products").json(&ProductFixtures::handbook()).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["price"].is_number());
        assert_eq!(body["active"], json!(true));
    }

    #[tokio::test]
    async fn test_list_filters_by_category_and_active() {
        let h = harness();
        h.products.seed(1, ProductFixtures::widget()).await;
        h.products.seed(2, ProductFixtures::retired_gadget()).await;
        h.products.seed(3, ProductFixtures::handbook()).await;

        let tools: Vec<Product> = h
            .server
            .get("/api/products")
            .add_query_param("category", "tools")
            .await
            .json();
        assert_eq!(tools.len(), 2);

        let active_tools: Vec<Product> = h
            .server
            .get("/api/products")
            .add_query_param("category", "tools")
            .add_query_param("active", true)
            .await
            .json();
        let names: Vec<_> = active_tools.iter().filter_map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec!["Widget"]);

        let inactive: Vec<Product> = h
            .server
            .get("/api/products")
            .add_query_param("active", false)
            .await
            .json();
        assert_eq!(inactive.len(), 1);

        let everything: Vec<Product> = h.server.get("/api/products").await.json();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let h = harness();

        let response = h
            .server
            .post("/api/products")
            .content_type("application/json")
            .bytes("{ not json".into())
            .await;

        response.assert_status_bad_request();
        assert!(h.products.is_empty().await);
    }
}

mod create_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_failure_is_masked_by_default() {
        let h = harness();
        h.employees.fail_creates(true);

        let response = h
            .server
            .post("/api/employees")
            .json(&EmployeeFixtures::ada())
            .await;

        response.assert_status(StatusCode::CREATED);
        let echoed: Employee = response.json();
        assert_eq!(echoed, EmployeeFixtures::ada());
        assert!(h.employees.is_empty().await);
    }

    #[tokio::test]
    async fn test_failure_propagates_when_unmasked() {
        let h = harness_with(ApiConfig {
            mask_create_failures: false,
            ..ApiConfig::default()
        });
        h.products.fail_creates(true);

        let response = h.server.post("/api/products").json(&ProductFixtures::widget()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "internal_error");
        assert!(body.message.contains("Error creating Product"));
    }
}

mod degraded_mode_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_empty() {
        let server = degraded_server();

        server.get("/api/employees").await.assert_json(&json!([]));
        server.get("/api/products").await.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_get_is_404() {
        let server = degraded_server();

        server.get("/api/employees/1").await.assert_status_not_found();
        server.get("/api/products/1").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_create_echoes_body() {
        let server = degraded_server();

        let response = server.post("/api/products").json(&ProductFixtures::widget()).await;

        response.assert_status(StatusCode::CREATED);
        let echoed: Product = response.json();
        assert_eq!(echoed, ProductFixtures::widget());
    }

    #[tokio::test]
    async fn test_update_echoes_body_with_path_id() {
        let server = degraded_server();

        let response = server
            .put("/api/employees/42")
            .json(&json!({ "id": 7, "firstName": "Ada" }))
            .await;

        response.assert_status_ok();
        let echoed: Employee = response.json();
        assert_eq!(echoed.id.map(|id| id.value()), Some(42));
        assert_eq!(echoed.first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_delete_is_204() {
        let server = degraded_server();

        server.delete("/api/products/42").await.assert_status(StatusCode::NO_CONTENT);
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_version() {
        let h = harness();

        let health: HealthResponse = h.server.get("/api/health").await.json();

        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_follows_stores() {
        let h = harness();

        let ready: HealthResponse = h.server.get("/api/health/ready").await.json();
        assert_eq!(ready.status, "ready");

        h.products.set_unhealthy(true);
        h.server
            .get("/api/health/ready")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_in_degraded_mode() {
        let ready: HealthResponse = degraded_server().get("/api/health/ready").await.json();
        assert_eq!(ready.status, "degraded");
    }
}

mod routing_tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_live_under_context_path() {
        let h = harness();

        h.server.get("/employees").await.assert_status_not_found();
        h.server.get("/api/employees").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_root_context_path() {
        let h = harness_with(ApiConfig {
            context_path: "/".to_string(),
            ..ApiConfig::default()
        });

        h.server.get("/employees").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_cors_mirrors_origin_with_credentials() {
        let h = harness();

        let response = h
            .server
            .get("/api/products")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://shop.example"))
            .await;

        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "http://shop.example");
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS), "true");
    }
}
