//! 测试公共模块
//! 主体、线索与策略快照的构造辅助

#![allow(dead_code)]

use chrono::Utc;
use lead_system::models::actor::{Actor, Role};
use lead_system::models::lead::Lead;
use lead_system::models::module::ModuleId;
use lead_system::models::privacy::{PolicySnapshot, PrivacySetting};
use std::collections::HashSet;
use uuid::Uuid;

/// 构造主体
pub fn actor(role: Role, branch_id: Option<Uuid>) -> Actor {
    Actor {
        id: Uuid::new_v4(),
        role,
        branch_id,
        permissions: HashSet::new(),
    }
}

pub fn admin() -> Actor {
    actor(Role::Admin, None)
}

pub fn manager(branch_id: Uuid) -> Actor {
    actor(Role::Manager, Some(branch_id))
}

pub fn staff(branch_id: Uuid) -> Actor {
    actor(Role::Staff, Some(branch_id))
}

/// 带模块权限的主体
pub fn actor_with_permissions(role: Role, modules: &[ModuleId]) -> Actor {
    Actor {
        id: Uuid::new_v4(),
        role,
        branch_id: Some(Uuid::new_v4()),
        permissions: modules.iter().copied().collect(),
    }
}

/// 构造线索
pub fn lead(owner_id: Uuid, branch_id: Uuid) -> Lead {
    Lead {
        id: Uuid::new_v4(),
        owner_id,
        branch_id,
        customer_name: "Test Customer".to_string(),
        customer_phone: Some("13900000000".to_string()),
        customer_email: Some("customer@example.com".to_string()),
        vehicle_model: Some("Sedan X".to_string()),
        source: Some("referral".to_string()),
        status: "new".to_string(),
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// 从 (键, 是否开启) 对构造策略快照
pub fn snapshot(entries: &[(&str, bool)]) -> PolicySnapshot {
    let settings: Vec<PrivacySetting> = entries
        .iter()
        .map(|(key, enabled)| PrivacySetting {
            id: Uuid::new_v4(),
            setting_key: key.to_string(),
            is_enabled: *enabled,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .collect();

    PolicySnapshot::from_settings(&settings)
}
