//! 模块权限目录
//! 编译期固定的模块注册表与"用户是否拥有模块"查询。
//! 所有查询都是全函数，没有错误分支。

use crate::models::actor::Actor;
use crate::models::module::{Module, ModuleId};
use once_cell::sync::Lazy;

/// 模块注册表（插入顺序即展示顺序）
static MODULES: Lazy<Vec<Module>> = Lazy::new(|| {
    vec![
        Module {
            id: ModuleId::Analytics,
            path: "/analytics",
            label: "Analytics",
        },
        Module {
            id: ModuleId::Users,
            path: "/users",
            label: "Users",
        },
        Module {
            id: ModuleId::Branches,
            path: "/branches",
            label: "Branches",
        },
        Module {
            id: ModuleId::Vehicles,
            path: "/vehicles",
            label: "Vehicles",
        },
        Module {
            id: ModuleId::Settings,
            path: "/settings",
            label: "Settings",
        },
    ]
});

/// 列出全部模块
pub fn list_modules() -> &'static [Module] {
    &MODULES
}

/// 按路径解析模块；`/users` 与 `/users/42` 都命中 users 模块
pub fn find_module_by_path(path: &str) -> Option<&'static Module> {
    MODULES
        .iter()
        .find(|m| path == m.path || path.starts_with(&format!("{}/", m.path)))
}

/// 用户是否拥有模块导航权限
///
/// 主体缺失时为 false。角色在这里没有任何加成：admin 也必须被
/// 显式授予模块权限，角色与模块权限是 RouteGate 的两个独立输入。
pub fn has_module_permission(actor: Option<&Actor>, module: ModuleId) -> bool {
    match actor {
        Some(actor) => actor.has_permission(module),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn actor_with(perms: &[ModuleId]) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role: crate::models::actor::Role::Admin,
            branch_id: None,
            permissions: perms.iter().copied().collect::<HashSet<_>>(),
        }
    }

    #[test]
    fn test_module_ids_unique() {
        let mut seen = HashSet::new();
        for module in list_modules() {
            assert!(seen.insert(module.id), "duplicate module id {:?}", module.id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_paths_map_to_single_module() {
        let mut seen = HashSet::new();
        for module in list_modules() {
            assert!(seen.insert(module.path));
        }
    }

    #[test]
    fn test_find_module_by_path() {
        assert_eq!(
            find_module_by_path("/users").map(|m| m.id),
            Some(ModuleId::Users)
        );
        assert_eq!(
            find_module_by_path("/users/42").map(|m| m.id),
            Some(ModuleId::Users)
        );
        assert!(find_module_by_path("/account").is_none());
        assert!(find_module_by_path("/usersextra").is_none());
    }

    #[test]
    fn test_has_module_permission_requires_actor() {
        assert!(!has_module_permission(None, ModuleId::Users));
    }

    #[test]
    fn test_admin_without_grant_is_denied() {
        // 角色不推导模块权限
        let admin = actor_with(&[ModuleId::Analytics]);
        assert!(!has_module_permission(Some(&admin), ModuleId::Users));
        assert!(has_module_permission(Some(&admin), ModuleId::Analytics));
    }
}
