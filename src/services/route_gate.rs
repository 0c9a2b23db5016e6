//! 路由门
//! 导航前的纯谓词：主体能否进入某个路径。无副作用，可在每次
//! 请求/渲染时调用。

use crate::models::actor::Actor;
use crate::services::catalog;

/// 仪表盘路径对任何已认证主体开放
const DASHBOARD_PATHS: [&str; 2] = ["/", "/dashboard"];

/// 主体能否访问路径
///
/// 未认证主体一律拒绝。仪表盘对所有已认证主体开放。路径未命中
/// 任何模块时默认放行：模块覆盖是敏感区域的 denylist，不是全应用
/// 的 whitelist（例如账户设置页不在权限系统内）。命中模块则委托
/// 模块权限检查。
pub fn can_access_path(actor: Option<&Actor>, path: &str) -> bool {
    let Some(actor) = actor else {
        return false;
    };

    if DASHBOARD_PATHS.contains(&path) {
        return true;
    }

    match catalog::find_module_by_path(path) {
        Some(module) => catalog::has_module_permission(Some(actor), module.id),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::actor::Role;
    use crate::models::module::ModuleId;
    use uuid::Uuid;

    fn staff_with(perms: &[ModuleId]) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role: Role::Staff,
            branch_id: Some(Uuid::new_v4()),
            permissions: perms.iter().copied().collect(),
        }
    }

    #[test]
    fn test_null_actor_denied_everywhere() {
        assert!(!can_access_path(None, "/"));
        assert!(!can_access_path(None, "/dashboard"));
        assert!(!can_access_path(None, "/account"));
        assert!(!can_access_path(None, "/users"));
    }

    #[test]
    fn test_dashboard_open_to_any_actor() {
        let actor = staff_with(&[]);
        assert!(can_access_path(Some(&actor), "/"));
        assert!(can_access_path(Some(&actor), "/dashboard"));
    }

    #[test]
    fn test_unmapped_path_default_allow() {
        let actor = staff_with(&[]);
        assert!(can_access_path(Some(&actor), "/account"));
        assert!(can_access_path(Some(&actor), "/profile/password"));
    }

    #[test]
    fn test_module_path_requires_grant() {
        let actor = staff_with(&[ModuleId::Vehicles]);
        assert!(can_access_path(Some(&actor), "/vehicles"));
        assert!(can_access_path(Some(&actor), "/vehicles/7"));
        assert!(!can_access_path(Some(&actor), "/users"));
        assert!(!can_access_path(Some(&actor), "/settings"));
    }
}
