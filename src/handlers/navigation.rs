//! 导航的 HTTP 处理器
//! RouteGate 的对外形态：列出主体可进入的模块，或检查任意路径

use crate::{
    auth::middleware::ActorContext,
    error::AppError,
    models::module::Module,
    services::{catalog, route_gate},
};
use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    /// 可选：检查单个路径而不是列出模块
    pub path: Option<String>,
}

/// 当前主体的导航视图
///
/// 不带 path 参数时返回目录里主体可进入的模块（目录顺序即展示
/// 顺序）；带 path 时返回该路径的门禁结果。未认证的请求在认证层
/// 就被拒绝，这里永远有主体。
pub async fn navigation(
    actor_context: ActorContext,
    Query(query): Query<NavigationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;

    if let Some(path) = query.path {
        let allowed = route_gate::can_access_path(Some(actor), &path);
        return Ok(Json(json!({ "path": path, "allowed": allowed })));
    }

    let modules: Vec<&Module> = catalog::list_modules()
        .iter()
        .filter(|m| catalog::has_module_permission(Some(actor), m.id))
        .collect();

    Ok(Json(json!({
        "modules": modules,
        "count": modules.len()
    })))
}
