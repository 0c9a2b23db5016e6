//! 路由门与模块目录测试

use lead_system::models::actor::Role;
use lead_system::models::module::ModuleId;
use lead_system::services::{catalog, route_gate::can_access_path};

mod common;
use common::actor_with_permissions;

#[test]
fn null_actor_accesses_nothing() {
    for path in ["/", "/dashboard", "/users", "/account", "/vehicles/9"] {
        assert!(!can_access_path(None, path), "null actor allowed on {path}");
    }
}

#[test]
fn dashboard_open_to_any_authenticated_actor() {
    let actor = actor_with_permissions(Role::Staff, &[]);
    assert!(can_access_path(Some(&actor), "/"));
    assert!(can_access_path(Some(&actor), "/dashboard"));
}

#[test]
fn module_paths_gated_by_explicit_grant() {
    let actor = actor_with_permissions(Role::Staff, &[ModuleId::Analytics, ModuleId::Vehicles]);

    assert!(can_access_path(Some(&actor), "/analytics"));
    assert!(can_access_path(Some(&actor), "/vehicles"));
    assert!(can_access_path(Some(&actor), "/vehicles/42"));

    assert!(!can_access_path(Some(&actor), "/users"));
    assert!(!can_access_path(Some(&actor), "/branches"));
    assert!(!can_access_path(Some(&actor), "/settings"));
}

#[test]
fn role_grants_no_navigation_rights() {
    // admin 角色没有模块授权时同样被挡：角色与导航权限正交
    let bare_admin = actor_with_permissions(Role::Admin, &[]);

    assert!(can_access_path(Some(&bare_admin), "/dashboard"));
    assert!(!can_access_path(Some(&bare_admin), "/settings"));
    assert!(!can_access_path(Some(&bare_admin), "/users"));
}

#[test]
fn unmapped_paths_are_open_by_default() {
    let actor = actor_with_permissions(Role::Manager, &[]);

    // 模块覆盖是敏感区域的 denylist，账户页之类默认放行
    assert!(can_access_path(Some(&actor), "/account"));
    assert!(can_access_path(Some(&actor), "/profile/password"));
    // 前缀相似但不是子路径的不算命中
    assert!(can_access_path(Some(&actor), "/usersettings"));
}

#[test]
fn catalog_order_is_stable_display_order() {
    let ids: Vec<ModuleId> = catalog::list_modules().iter().map(|m| m.id).collect();
    assert_eq!(
        ids,
        vec![
            ModuleId::Analytics,
            ModuleId::Users,
            ModuleId::Branches,
            ModuleId::Vehicles,
            ModuleId::Settings,
        ]
    );
}

#[test]
fn catalog_paths_resolve_uniquely() {
    for module in catalog::list_modules() {
        let found = catalog::find_module_by_path(module.path).expect("path must resolve");
        assert_eq!(found.id, module.id);
    }
    assert!(catalog::find_module_by_path("/nonexistent").is_none());
}
