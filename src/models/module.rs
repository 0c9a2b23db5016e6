//! Module catalog domain model
//! 可导航模块的静态注册表（编译期固定，插入顺序即展示顺序）

use serde::{Deserialize, Serialize};

/// 模块标识（稳定枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Analytics,
    Users,
    Branches,
    Vehicles,
    Settings,
}

impl ModuleId {
    /// 解析模块标识字符串；未知值返回 None（逐项 fail closed）
    pub fn parse(s: &str) -> Option<ModuleId> {
        match s {
            "analytics" => Some(ModuleId::Analytics),
            "users" => Some(ModuleId::Users),
            "branches" => Some(ModuleId::Branches),
            "vehicles" => Some(ModuleId::Vehicles),
            "settings" => Some(ModuleId::Settings),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Analytics => "analytics",
            ModuleId::Users => "users",
            ModuleId::Branches => "branches",
            ModuleId::Vehicles => "vehicles",
            ModuleId::Settings => "settings",
        }
    }
}

/// 可导航模块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Module {
    pub id: ModuleId,
    pub path: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_roundtrip() {
        for id in [
            ModuleId::Analytics,
            ModuleId::Users,
            ModuleId::Branches,
            ModuleId::Vehicles,
            ModuleId::Settings,
        ] {
            assert_eq!(ModuleId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_module_id_parse_unknown() {
        assert_eq!(ModuleId::parse("reports"), None);
        assert_eq!(ModuleId::parse(""), None);
    }
}
