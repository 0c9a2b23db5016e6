//! 认证中间件
//! Bearer 令牌 → Claims → Actor，挂到请求扩展供 handler 提取。

use crate::{
    auth::jwt::JwtService,
    error::AppError,
    models::actor::{Actor, Role},
    models::module::ModuleId,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// 认证上下文（附加到请求扩展）
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub actor: Actor,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 ActorContext
impl<S> FromRequestParts<S> for ActorContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActorContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(|t| t.to_string()))
        .ok_or(AppError::Unauthorized)
}

/// 把令牌声明构造成 Actor
///
/// 未知角色落到 Role::Unknown（评估时 fail closed），未知模块 ID
/// 逐项丢弃并告警，都不会导致令牌被拒。manager/staff 缺分支时记录
/// 策略不一致告警；缺分支的分支匹配恒为假，自然收紧。
pub fn actor_from_claims(claims: &crate::auth::jwt::Claims) -> Result<Actor, AppError> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

    let role = Role::parse(&claims.role);
    if role == Role::Unknown {
        tracing::warn!(actor_id = %id, role = %claims.role, "Unrecognized role in token");
    }

    let permissions = claims
        .permissions
        .iter()
        .filter_map(|p| {
            let parsed = ModuleId::parse(p);
            if parsed.is_none() {
                tracing::warn!(actor_id = %id, module = %p, "Unknown module id in token, dropped");
            }
            parsed
        })
        .collect();

    if claims.branch_id.is_none() && matches!(role, Role::Manager | Role::Staff) {
        tracing::warn!(actor_id = %id, role = role.as_str(), "Actor has no branch");
    }

    Ok(Actor {
        id,
        role,
        branch_id: claims.branch_id,
        permissions,
    })
}

/// 认证中间件 - 必须认证
pub async fn actor_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;
    let claims = jwt_service.validate_access_token(&token)?;
    let actor = actor_from_claims(&claims)?;

    req.extensions_mut().insert(ActorContext { actor });

    Ok(next.run(req).await)
}
