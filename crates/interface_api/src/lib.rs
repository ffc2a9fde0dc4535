//! HTTP API Layer
//!
//! This crate provides the REST API for the employee and product services
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource, with degraded-mode
//!   fallbacks when a store is not configured
//! - **Middleware**: Request logging, tracing, CORS
//! - **DTOs**: Query-string shapes
//! - **Error Handling**: Consistent `{"error", "message"}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config)
//!     .with_employee_store(Arc::new(EmployeeRepository::new(pool.clone())))
//!     .with_product_store(Arc::new(ProductRepository::new(pool)));
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_employee::EmployeeStore;
use domain_product::ProductStore;

use crate::config::ApiConfig;
use crate::handlers::{employee, health, product};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
///
/// A missing store puts its resource in degraded mode.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub employees: Option<Arc<dyn EmployeeStore>>,
    pub products: Option<Arc<dyn ProductStore>>,
}

impl AppState {
    /// Creates a state without stores
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            employees: None,
            products: None,
        }
    }

    pub fn with_employee_store(mut self, store: Arc<dyn EmployeeStore>) -> Self {
        self.employees = Some(store);
        self
    }

    pub fn with_product_store(mut self, store: Arc<dyn ProductStore>) -> Self {
        self.products = Some(store);
        self
    }

    /// Returns true if no store is configured
    pub fn is_degraded(&self) -> bool {
        self.employees.is_none() && self.products.is_none()
    }
}

/// Creates the main API router
///
/// Every route is mounted under the configured context path.
pub fn create_router(state: AppState) -> Router {
    let employee_routes = Router::new()
        .route("/", get(employee::list_employees).post(employee::create_employee))
        .route(
            "/:id",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        );

    let product_routes = Router::new()
        .route("/", get(product::list_products).post(product::create_product))
        .route(
            "/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        );

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/employees", employee_routes)
        .nest("/products", product_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware));

    let prefix = state.config.route_prefix().to_string();
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(&prefix, api_routes)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// CORS policy: any origin (mirrored so credentials are allowed)
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            header::ACCESS_CONTROL_REQUEST_METHOD,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ])
}
