//! Privacy setting domain model
//! 布尔开关表 + 按键前缀的作用域分类 + 策略快照

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 引擎消费的全部设置键（迁移脚本一次性种子化，只翻转不删除）
pub mod keys {
    pub const MANAGER_BRANCH_ISOLATION: &str = "manager_branch_isolation";
    pub const MANAGER_ALL_LEADS_ACCESS: &str = "manager_all_leads_access";
    pub const MANAGER_CROSS_BRANCH_REPORTS: &str = "manager_cross_branch_reports";
    pub const STAFF_OWN_LEADS_ONLY: &str = "staff_own_leads_only";
    pub const STAFF_BRANCH_LEADS_ACCESS: &str = "staff_branch_leads_access";
    pub const STAFF_EDIT_PERMISSIONS: &str = "staff_edit_permissions";
    pub const GLOBAL_LEAD_VISIBILITY: &str = "global_lead_visibility";
    pub const ANONYMIZE_CUSTOMER_DATA: &str = "anonymize_customer_data";
    pub const HIDE_CONTACT_DETAILS: &str = "hide_contact_details";
    pub const RESTRICT_LEAD_DELETION: &str = "restrict_lead_deletion";
    pub const AUDIT_TRAIL_LOGGING: &str = "audit_trail_logging";
    pub const DATA_EXPORT_RESTRICTIONS: &str = "data_export_restrictions";
    pub const ADMIN_LEADS_VISIBLE_TO_ALL: &str = "admin_leads_visible_to_all";
}

/// 隐私设置行
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrivacySetting {
    pub id: Uuid,
    pub setting_key: String,
    pub is_enabled: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 设置作用域，由键前缀决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingScope {
    /// `manager_*`：评估 manager 主体时生效
    Manager,
    /// `staff_*`：评估 staff 主体时生效
    Staff,
    /// `admin_*`：关于 admin 所有记录的策略
    Admin,
    /// 无前缀：对所有评估无条件生效
    Global,
}

impl SettingScope {
    pub fn of(setting_key: &str) -> SettingScope {
        if setting_key.starts_with("manager_") {
            SettingScope::Manager
        } else if setting_key.starts_with("staff_") {
            SettingScope::Staff
        } else if setting_key.starts_with("admin_") {
            SettingScope::Admin
        } else {
            SettingScope::Global
        }
    }
}

/// 策略快照
///
/// 从设置表一次性读出的不可变值。一次请求内的所有评估共用同一个
/// 快照，保证同一批记录按同一个策略版本判定；评估过程中绝不回表。
/// 缺失的键表示"策略默认值"，不是错误。
#[derive(Debug, Clone, Default)]
pub struct PolicySnapshot {
    enabled: HashMap<String, bool>,
}

impl PolicySnapshot {
    pub fn from_settings(settings: &[PrivacySetting]) -> Self {
        let enabled = settings
            .iter()
            .map(|s| (s.setting_key.clone(), s.is_enabled))
            .collect();
        Self { enabled }
    }

    /// 显式值；键不存在时返回 None
    pub fn is_enabled(&self, key: &str) -> Option<bool> {
        self.enabled.get(key).copied()
    }

    /// 带策略默认值的读取
    pub fn enabled_or(&self, key: &str, default: bool) -> bool {
        self.is_enabled(key).unwrap_or(default)
    }
}

/// 翻转设置的请求体
#[derive(Debug, Deserialize)]
pub struct ToggleSettingRequest {
    pub is_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_classification_by_prefix() {
        assert_eq!(
            SettingScope::of(keys::MANAGER_BRANCH_ISOLATION),
            SettingScope::Manager
        );
        assert_eq!(
            SettingScope::of(keys::STAFF_OWN_LEADS_ONLY),
            SettingScope::Staff
        );
        assert_eq!(
            SettingScope::of(keys::ADMIN_LEADS_VISIBLE_TO_ALL),
            SettingScope::Admin
        );
        assert_eq!(
            SettingScope::of(keys::RESTRICT_LEAD_DELETION),
            SettingScope::Global
        );
        assert_eq!(
            SettingScope::of(keys::GLOBAL_LEAD_VISIBILITY),
            SettingScope::Global
        );
    }

    #[test]
    fn test_snapshot_absent_key_is_default() {
        let snapshot = PolicySnapshot::default();
        assert_eq!(snapshot.is_enabled(keys::STAFF_OWN_LEADS_ONLY), None);
        assert!(snapshot.enabled_or(keys::ADMIN_LEADS_VISIBLE_TO_ALL, true));
        assert!(!snapshot.enabled_or(keys::STAFF_OWN_LEADS_ONLY, false));
    }
}
