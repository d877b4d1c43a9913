//! Sample order service the document is generated for.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use apidocs_generator::{ApiDescription, SchemaProcessor};
use apidocs_types::NoHandler;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use utoipa::ToSchema;
use utoipa::openapi::{RefOr, Schema};

/// Owner of the order operations.
pub struct OrdersController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub items: Vec<String>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewOrder {
    pub customer: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Clone, Default)]
pub struct OrdersState {
    orders: Arc<RwLock<BTreeMap<u64, Order>>>,
    last_id: Arc<AtomicU64>,
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders", body = [Order]),
    )
)]
pub async fn list_orders(State(state): State<OrdersState>) -> Json<Vec<Order>> {
    Json(state.orders.read().await.values().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = u64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "No order with this id"),
    )
)]
pub async fn get_order(
    State(state): State<OrdersState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, StatusCode> {
    state
        .orders
        .read()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order was created", body = Order),
    )
)]
pub async fn create_order(
    State(state): State<OrdersState>,
    Json(new_order): Json<NewOrder>,
) -> impl IntoResponse {
    let id = state.last_id.fetch_add(1, Ordering::SeqCst) + 1;
    let order = Order {
        id,
        customer: new_order.customer,
        items: new_order.items,
        status: OrderStatus::Open,
    };
    state.orders.write().await.insert(id, order.clone());
    debug!("Created order {id}");
    (StatusCode::CREATED, Json(order))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = u64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order was cancelled", body = Order),
        (status = 404, description = "No order with this id"),
    )
)]
pub async fn cancel_order(
    State(state): State<OrdersState>,
    Path(id): Path<u64>,
) -> Result<Json<Order>, StatusCode> {
    let mut orders = state.orders.write().await;
    let order = orders.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    order.status = OrderStatus::Cancelled;
    Ok(Json(order.clone()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus),
    )
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".into(),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order).delete(cancel_order))
        .route("/health", get(health))
        .with_state(OrdersState::default())
}

/// Operations and schemas of the service. `/health` belongs to [`NoHandler`] so it stays
/// out of the published document.
pub fn api_description() -> ApiDescription {
    ApiDescription::new()
        .path::<OrdersController, __path_list_orders>()
        .path::<OrdersController, __path_get_order>()
        .path::<OrdersController, __path_create_order>()
        .path::<OrdersController, __path_cancel_order>()
        .path::<NoHandler, __path_health>()
        .schema::<Order>()
        .schema::<OrderStatus>()
        .schema::<NewOrder>()
}

/// Titles every object schema with its component name.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTitles;

impl SchemaProcessor for SchemaTitles {
    fn process(&self, name: &str, schema: &mut RefOr<Schema>) {
        if let RefOr::T(Schema::Object(object)) = schema {
            object.title.get_or_insert_with(|| name.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs_types::TypeRef;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn server() -> TestServer {
        TestServer::try_new(router()).expect("Failed to build test server")
    }

    #[tokio::test]
    async fn orders_can_be_created_read_and_cancelled() {
        let server = server();
        let created: Order = server
            .post("/orders")
            .json(&json!({ "customer": "Ada", "items": ["keyboard"] }))
            .await
            .json();
        assert_eq!(created.id, 1);
        assert_eq!(created.status, OrderStatus::Open);

        let fetched: Order = server.get("/orders/1").await.json();
        assert_eq!(fetched, created);

        let cancelled: Order = server.delete("/orders/1").await.json();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let all: Vec<Order> = server.get("/orders").await.json();
        assert_eq!(all, vec![cancelled]);
    }

    #[tokio::test]
    async fn creating_answers_created() {
        server()
            .post("/orders")
            .json(&json!({ "customer": "Ada", "items": [] }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let server = server();
        server
            .get("/orders/42")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/orders/42")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_is_served() {
        let status: HealthStatus = server().get("/health").await.json();
        assert_eq!(status.status, "OK");
    }

    #[test]
    fn description_tags_operations_with_their_owner() {
        let description = api_description();
        let owners: Vec<(String, TypeRef)> = description
            .operations()
            .iter()
            .map(|operation| (operation.path.clone(), operation.handler))
            .collect();
        assert_eq!(
            owners,
            vec![
                ("/orders".to_string(), TypeRef::of::<OrdersController>()),
                ("/orders/{id}".to_string(), TypeRef::of::<OrdersController>()),
                ("/orders".to_string(), TypeRef::of::<OrdersController>()),
                ("/orders/{id}".to_string(), TypeRef::of::<OrdersController>()),
                ("/health".to_string(), TypeRef::of::<NoHandler>()),
            ]
        );
        for name in ["Order", "OrderStatus", "NewOrder"] {
            assert!(description.schemas().contains_key(name), "{name}");
        }
    }

    #[test]
    fn schema_titles_keep_existing_titles() {
        let mut schemas = api_description().schemas().clone();
        for (name, schema) in schemas.iter_mut() {
            SchemaTitles.process(name, schema);
        }
        let order = serde_json::to_value(&schemas["Order"]).unwrap();
        assert_eq!(order["title"], "Order");
    }
}
