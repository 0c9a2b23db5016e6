//! 线索服务
//! 列表/读写边界：任何记录集在离开这里之前都先过 `filter_visible`，
//! 任何写操作之前都先过 `evaluate`。未过滤的记录绝不外泄。

use crate::{
    error::AppError,
    models::actor::{Actor, Role},
    models::lead::{CreateLeadRequest, Lead, LeadStatistics, UpdateLeadRequest},
    models::privacy::{keys, PolicySnapshot},
    repository::lead_repo::LeadRepository,
    services::policy_engine,
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LeadService {
    db: PgPool,
}

impl LeadService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出主体可见的线索（输入顺序保持不变）
    pub async fn list_visible(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
    ) -> Result<Vec<Lead>, AppError> {
        let repo = LeadRepository::new(self.db.clone());
        let all = repo.list().await?;
        Ok(policy_engine::filter_visible(actor, all, snapshot))
    }

    /// 读取单条线索；策略不可见时返回 NotFound，不暴露记录存在性
    pub async fn get_visible(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
        id: Uuid,
    ) -> Result<Lead, AppError> {
        let repo = LeadRepository::new(self.db.clone());
        let lead = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

        if !policy_engine::evaluate(actor, &lead, snapshot).can_view {
            return Err(AppError::NotFound);
        }

        Ok(lead)
    }

    /// 创建线索；owner 是当前主体，分支取主体分支（admin 可显式指定）
    pub async fn create(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
        req: &CreateLeadRequest,
    ) -> Result<Lead, AppError> {
        let branch_id = match (actor.role, req.branch_id, actor.branch_id) {
            (Role::Admin, Some(explicit), _) => explicit,
            (_, _, Some(own)) => own,
            (Role::Admin, None, None) => {
                return Err(AppError::BadRequest(
                    "branch_id is required when the caller has no branch".to_string(),
                ))
            }
            _ => return Err(AppError::Forbidden),
        };

        let repo = LeadRepository::new(self.db.clone());
        let lead = repo.create(actor.id, branch_id, req).await?;

        self.audit(actor, snapshot, "lead.create", lead.id);
        Ok(lead)
    }

    /// 更新线索；先评估 can_edit
    pub async fn update(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
        id: Uuid,
        req: &UpdateLeadRequest,
    ) -> Result<Lead, AppError> {
        let repo = LeadRepository::new(self.db.clone());
        let lead = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

        let decision = policy_engine::evaluate(actor, &lead, snapshot);
        if !decision.can_view {
            // 不可见的记录连存在都不暴露
            return Err(AppError::NotFound);
        }
        if !decision.can_edit {
            return Err(AppError::Forbidden);
        }

        let updated = repo.update(id, req).await?.ok_or(AppError::NotFound)?;
        self.audit(actor, snapshot, "lead.update", id);
        Ok(updated)
    }

    /// 删除线索；先评估 can_delete
    pub async fn delete(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
        id: Uuid,
    ) -> Result<(), AppError> {
        let repo = LeadRepository::new(self.db.clone());
        let lead = repo.find_by_id(&id).await?.ok_or(AppError::NotFound)?;

        let decision = policy_engine::evaluate(actor, &lead, snapshot);
        if !decision.can_view {
            return Err(AppError::NotFound);
        }
        if !decision.can_delete {
            return Err(AppError::Forbidden);
        }

        repo.delete(id).await?;
        self.audit(actor, snapshot, "lead.delete", id);
        Ok(())
    }

    /// 按状态统计
    ///
    /// 基线是策略可见集；manager 在 `manager_cross_branch_reports`
    /// 开启时按全部分支聚合（报表放宽只影响计数，不影响列表）。
    pub async fn statistics(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
    ) -> Result<LeadStatistics, AppError> {
        let repo = LeadRepository::new(self.db.clone());

        let cross_branch = actor.role == Role::Manager
            && snapshot.enabled_or(keys::MANAGER_CROSS_BRANCH_REPORTS, false);

        let leads = if cross_branch {
            repo.list().await?
        } else {
            self.list_visible(actor, snapshot).await?
        };

        Ok(LeadStatistics::from_leads(&leads))
    }

    /// 导出可见集
    ///
    /// `data_export_restrictions` 开启时仅 admin 可导出。
    pub async fn export_visible(
        &self,
        actor: &Actor,
        snapshot: &PolicySnapshot,
    ) -> Result<Vec<Lead>, AppError> {
        if actor.role != Role::Admin
            && snapshot.enabled_or(keys::DATA_EXPORT_RESTRICTIONS, false)
        {
            tracing::warn!(actor_id = %actor.id, "Lead export blocked by policy");
            return Err(AppError::Forbidden);
        }

        self.list_visible(actor, snapshot).await
    }

    fn audit(&self, actor: &Actor, snapshot: &PolicySnapshot, action: &str, lead_id: Uuid) {
        if snapshot.enabled_or(keys::AUDIT_TRAIL_LOGGING, false) {
            tracing::info!(
                target: "audit",
                actor_id = %actor.id,
                role = actor.role.as_str(),
                lead_id = %lead_id,
                action = action,
                "lead mutation"
            );
        }
    }
}
