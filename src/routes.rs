//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::{handlers, middleware::AppState};

/// 请求体上限（1 MiB，线索负载远小于此）
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        // 导航（RouteGate）
        .route("/api/v1/navigation", get(handlers::navigation::navigation))

        // 线索（列表边界 + 变更边界）
        .route(
            "/api/v1/leads",
            get(handlers::lead::list_leads).post(handlers::lead::create_lead),
        )
        .route("/api/v1/leads/statistics", get(handlers::lead::lead_statistics))
        .route("/api/v1/leads/export", get(handlers::lead::export_leads))
        .route(
            "/api/v1/leads/{id}",
            get(handlers::lead::get_lead)
                .put(handlers::lead::update_lead)
                .delete(handlers::lead::delete_lead),
        )

        // 隐私设置（设置管理边界，handler 内限 admin）
        .route("/api/v1/privacy-settings", get(handlers::privacy::list_settings))
        .route("/api/v1/privacy-settings/{id}", put(handlers::privacy::toggle_setting))
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::actor_auth_middleware,
        ));

    // 指标端点
    let metrics_routes = Router::new().route("/metrics", get(handlers::metrics::metrics_export));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(metrics_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::ip_whitelist_middleware,
        ))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
