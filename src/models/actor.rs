//! Actor domain model
//! 请求主体：角色 + 分支 + 模块导航权限

use crate::models::module::ModuleId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// 角色（会话期间不可变）
///
/// 角色与模块权限是两个独立的轴：角色决定数据可见性，
/// 模块权限决定导航可达性，二者互不推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
    /// 令牌携带了无法识别的角色字符串。
    /// 评估时按最严格情形处理（fail closed），不报错。
    #[serde(other)]
    Unknown,
}

impl Role {
    /// 解析角色字符串，未知值落到 `Unknown`
    pub fn parse(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "staff" => Role::Staff,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Unknown => "unknown",
        }
    }
}

/// 认证主体
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    /// manager/staff 必须有分支；admin 可以没有
    pub branch_id: Option<Uuid>,
    /// 可导航的模块集合（与角色无关）
    pub permissions: HashSet<ModuleId>,
}

impl Actor {
    pub fn has_permission(&self, module: ModuleId) -> bool {
        self.permissions.contains(&module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_known() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("manager"), Role::Manager);
        assert_eq!(Role::parse("staff"), Role::Staff);
    }

    #[test]
    fn test_role_parse_unknown_fails_closed() {
        assert_eq!(Role::parse("contractor"), Role::Unknown);
        assert_eq!(Role::parse(""), Role::Unknown);
        assert_eq!(Role::parse("Admin"), Role::Unknown);
    }
}
