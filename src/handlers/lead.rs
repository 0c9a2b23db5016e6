//! 线索管理的 HTTP 处理器
//! 每个请求读一次策略快照，然后把快照传给所有评估与脱敏。

use crate::{
    auth::middleware::ActorContext,
    error::AppError,
    middleware::AppState,
    models::lead::{CreateLeadRequest, LeadResponse, UpdateLeadRequest},
    services::policy_engine,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列出可见线索（已过滤、已脱敏）
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let leads = state.lead_service.list_visible(actor, &snapshot).await?;
    let flags = policy_engine::redaction_flags(&snapshot);

    let responses: Vec<LeadResponse> = leads
        .into_iter()
        .map(|lead| LeadResponse::redacted(lead, flags))
        .collect();

    Ok(Json(json!({
        "leads": responses,
        "count": responses.len()
    })))
}

/// 创建线索
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
    Json(req): Json<CreateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let lead = state.lead_service.create(actor, &snapshot, &req).await?;
    let flags = policy_engine::redaction_flags(&snapshot);

    Ok(Json(json!({
        "message": "Lead created",
        "lead": LeadResponse::redacted(lead, flags)
    })))
}

/// 获取线索详情
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let lead = state.lead_service.get_visible(actor, &snapshot, id).await?;
    let flags = policy_engine::redaction_flags(&snapshot);

    Ok(Json(LeadResponse::redacted(lead, flags)))
}

/// 更新线索
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(|e| AppError::BadRequest(e.to_string()))?;

    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let lead = state.lead_service.update(actor, &snapshot, id, &req).await?;
    let flags = policy_engine::redaction_flags(&snapshot);

    Ok(Json(json!({
        "message": "Lead updated",
        "lead": LeadResponse::redacted(lead, flags)
    })))
}

/// 删除线索
pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    state.lead_service.delete(actor, &snapshot, id).await?;

    Ok(Json(json!({ "message": "Lead deleted" })))
}

/// 线索统计
pub async fn lead_statistics(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let stats = state.lead_service.statistics(actor, &snapshot).await?;

    Ok(Json(stats))
}

/// 导出可见线索
pub async fn export_leads(
    State(state): State<Arc<AppState>>,
    actor_context: ActorContext,
) -> Result<impl IntoResponse, AppError> {
    let actor = &actor_context.actor;
    let snapshot = state.privacy_service.snapshot().await?;

    let leads = state.lead_service.export_visible(actor, &snapshot).await?;
    let flags = policy_engine::redaction_flags(&snapshot);

    let responses: Vec<LeadResponse> = leads
        .into_iter()
        .map(|lead| LeadResponse::redacted(lead, flags))
        .collect();

    Ok(Json(json!({
        "exported_at": chrono::Utc::now(),
        "leads": responses,
        "count": responses.len()
    })))
}
