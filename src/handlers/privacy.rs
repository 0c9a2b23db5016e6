//! 隐私设置的 HTTP 处理器
//! 设置的读与写都限 admin 主体：这是引擎文档化的调用前提，
//! 在这个 API 边界强制执行。

use crate::{
    auth::middleware::ActorContext,
    error::AppError,
    middleware::AppState,
    models::actor::{Actor, Role},
    models::privacy::ToggleSettingRequest,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn require_admin(actor: &Actor) -> Result<(), AppError> {
    if actor.role != Role::Admin {
        tracing::warn!(actor_id = %actor.id, "Non-admin attempted settings access");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// 列出全部隐私设置
pub async fn list_settings(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&actor_context.actor)?;

    let settings = state.privacy_service.list_settings().await?;

    Ok(Json(json!({
        "settings": settings,
        "count": settings.len()
    })))
}

/// 翻转隐私设置
///
/// 响应携带更新后的设置和必须失效的派生视图键（线索列表与统计
/// 都是用策略算出来的，此刻已过期）。
pub async fn toggle_setting(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleSettingRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&actor_context.actor)?;

    let (setting, invalidate) = state
        .privacy_service
        .set_enabled(actor_context.actor.id, id, req.is_enabled)
        .await?;

    Ok(Json(json!({
        "setting": setting,
        "invalidate": invalidate.iter().map(|k| k.as_str()).collect::<Vec<_>>()
    })))
}
