//! 应用层: 路由与各实体的处理器、模型和服务

pub mod customer;
pub mod health;
pub mod order;
pub mod product;

use std::time::Duration;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::database::DatabaseManager;
use customer::{handler as customers, service::CustomerService};
use order::{handler as orders, service::OrderService};
use product::{handler as products, service::ProductService};

/// 注入到每个处理器的持久化句柄
#[derive(Debug, Clone)]
pub struct AppState {
    pub database: DatabaseManager,
    pub customers: CustomerService,
    pub products: ProductService,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(database: DatabaseManager) -> Self {
        let pool = database.get_pool().clone();
        Self {
            customers: CustomerService::new(pool.clone()),
            products: ProductService::new(pool.clone()),
            orders: OrderService::new(pool),
            database,
        }
    }
}

/// 创建路由
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // 客户
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/:id",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/customers/:id/orders", get(customers::list_customer_orders))
        // 商品
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // 订单
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        // GET 形式保留以兼容旧客户端
        .route(
            "/orders/:id/add_product/:product_id",
            get(orders::add_product_to_order).post(orders::add_product_to_order),
        )
        .route(
            "/orders/:id/remove_product/:product_id",
            delete(orders::remove_product_from_order),
        )
        .route("/orders/:id/products", get(orders::list_order_products))
}

/// 组装完整应用 (路由 + 中间件 + 状态)
pub fn build_app(state: AppState, timeout: Duration) -> Router {
    // 自下而上由外到内 (逐层 layer 以便每层响应体统一为 axum Body)
    create_routes()
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
