//! 隐私设置服务
//! 设置表的读模型 + 唯一的变更入口 + 失效键契约。
//!
//! 调用前提：`set_enabled` 必须只由 API 边界确认过的 admin 主体
//! 触达，本服务不再复查角色。违反该前提会破坏对所有其他主体生效
//! 的策略，所以路由层把它挂在 admin 守卫之后。

use crate::{
    error::AppError,
    models::privacy::{keys, PolicySnapshot, PrivacySetting},
    repository::privacy_repo::PrivacyRepository,
};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// 设置变更后必须失效的派生视图
///
/// 线索列表和统计都是用策略算出来的派生数据，设置一翻转它们就
/// 过期了。这只是一份通知清单，传输方式（重取、事件总线）在核心
/// 之外。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheKey {
    PrivacySettings,
    LeadList,
    LeadStats,
}

impl CacheKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::PrivacySettings => "privacy-settings",
            CacheKey::LeadList => "leads",
            CacheKey::LeadStats => "lead-stats",
        }
    }
}

/// 任意一次成功翻转所波及的全部键
pub fn invalidation_keys() -> [CacheKey; 3] {
    [
        CacheKey::PrivacySettings,
        CacheKey::LeadList,
        CacheKey::LeadStats,
    ]
}

pub struct PrivacyService {
    db: PgPool,
}

impl PrivacyService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出全部设置（有序）
    pub async fn list_settings(&self) -> Result<Vec<PrivacySetting>, AppError> {
        let repo = PrivacyRepository::new(self.db.clone());
        repo.list().await
    }

    /// 读取策略快照
    ///
    /// 一次请求内只调用一次，之后把快照按值传给每次评估。
    pub async fn snapshot(&self) -> Result<PolicySnapshot, AppError> {
        let repo = PrivacyRepository::new(self.db.clone());
        let settings = repo.list().await?;
        Ok(PolicySnapshot::from_settings(&settings))
    }

    /// 翻转设置（唯一的变更入口）
    ///
    /// 单行原子覆盖，由行锁串行化，last-write-wins。返回更新后的
    /// 设置和必须失效的派生视图键。
    pub async fn set_enabled(
        &self,
        actor_id: Uuid,
        id: Uuid,
        is_enabled: bool,
    ) -> Result<(PrivacySetting, [CacheKey; 3]), AppError> {
        let repo = PrivacyRepository::new(self.db.clone());

        let updated = repo
            .set_enabled(id, is_enabled)
            .await?
            .ok_or(AppError::NotFound)?;

        let snapshot = self.snapshot().await?;
        if snapshot.enabled_or(keys::AUDIT_TRAIL_LOGGING, false) {
            tracing::info!(
                target: "audit",
                actor_id = %actor_id,
                setting_key = %updated.setting_key,
                is_enabled = is_enabled,
                "privacy.setting.toggle"
            );
        }

        tracing::info!(
            setting_key = %updated.setting_key,
            is_enabled = is_enabled,
            "Privacy setting toggled, dependent views stale"
        );

        Ok((updated, invalidation_keys()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidation_covers_all_derived_views() {
        let keys = invalidation_keys();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&CacheKey::PrivacySettings));
        assert!(keys.contains(&CacheKey::LeadList));
        assert!(keys.contains(&CacheKey::LeadStats));
    }

    #[test]
    fn test_cache_key_wire_names() {
        assert_eq!(CacheKey::PrivacySettings.as_str(), "privacy-settings");
        assert_eq!(CacheKey::LeadList.as_str(), "leads");
        assert_eq!(CacheKey::LeadStats.as_str(), "lead-stats");
    }
}
