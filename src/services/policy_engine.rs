//! 可见性策略引擎
//! 纯的、全定义的决策函数：给定主体、记录和策略快照，推导
//! {can_view, can_edit, can_delete, redaction}。每次访问重新求值，
//! 引擎自身不持有任何状态，也绝不跨设置变更缓存判定结果。
//!
//! 直接冲突的开关按"最严格者胜"裁决：
//!
//! | 角色    | 放宽开关                   | 收紧开关                  | 同时开启   |
//! |---------|----------------------------|---------------------------|------------|
//! | manager | manager_all_leads_access   | manager_branch_isolation  | 隔离生效   |
//! | staff   | staff_branch_leads_access  | staff_own_leads_only      | 仅本人生效 |

use crate::models::actor::{Actor, Role};
use crate::models::lead::{Lead, RedactionFlags, VisibilityDecision};
use crate::models::privacy::{keys, PolicySnapshot};

/// 评估单条记录
///
/// 全函数，永不失败：无法识别的角色按最严格情形处理（仅 owner
/// 可见、禁改禁删），记入日志但不对终端用户报错。
pub fn evaluate(actor: &Actor, record: &Lead, snapshot: &PolicySnapshot) -> VisibilityDecision {
    let is_owner = record.owner_id == actor.id;
    let same_branch = actor.branch_id.is_some_and(|b| b == record.branch_id);
    let redaction = redaction_flags(snapshot);

    let mut decision = match actor.role {
        Role::Admin => evaluate_admin(is_owner, snapshot, redaction),
        Role::Manager => evaluate_manager(same_branch, snapshot, redaction),
        Role::Staff => evaluate_staff(is_owner, same_branch, snapshot, redaction),
        Role::Unknown => {
            tracing::warn!(
                actor_id = %actor.id,
                "Unrecognized actor role, failing closed"
            );
            VisibilityDecision::denied_except_owner(is_owner, redaction)
        }
    };

    // 横切收窄：删除限制对 admin 以外的所有角色生效
    if actor.role != Role::Admin && snapshot.enabled_or(keys::RESTRICT_LEAD_DELETION, false) {
        decision.can_delete = false;
    }

    decision
}

/// Admin 基线：三项全真。
///
/// 唯一的例外是 `admin_leads_visible_to_all` 被显式关闭且记录
/// 不属于该 admin 本人：此时这条记录按最严格情形处理。admin
/// 特权本身也受策略控制，不是无条件覆盖。编辑/删除随可见性一起
/// 收窄，否则对不可见记录的写操作会暴露它的存在。
fn evaluate_admin(
    is_owner: bool,
    snapshot: &PolicySnapshot,
    redaction: RedactionFlags,
) -> VisibilityDecision {
    let visible_to_all = snapshot.enabled_or(keys::ADMIN_LEADS_VISIBLE_TO_ALL, true);

    if visible_to_all || is_owner {
        VisibilityDecision {
            can_view: true,
            can_edit: true,
            can_delete: true,
            redaction,
        }
    } else {
        VisibilityDecision::denied_except_owner(is_owner, redaction)
    }
}

/// Manager：默认分支内可见；`manager_all_leads_access` 放宽到全部
/// 分支；`manager_branch_isolation` 开启时强制分支隔离并压过放宽
/// 开关。编辑/删除跟随可见性（目前没有单独收窄它们的开关）。
fn evaluate_manager(
    same_branch: bool,
    snapshot: &PolicySnapshot,
    redaction: RedactionFlags,
) -> VisibilityDecision {
    let isolation = snapshot.enabled_or(keys::MANAGER_BRANCH_ISOLATION, false);
    let all_access = snapshot.enabled_or(keys::MANAGER_ALL_LEADS_ACCESS, false);

    // 隔离开启时压过放宽开关（最严格者胜）
    let can_view = if isolation {
        same_branch
    } else {
        all_access || same_branch
    };

    VisibilityDecision {
        can_view,
        can_edit: can_view,
        can_delete: can_view,
        redaction,
    }
}

/// Staff：默认仅本人创建的记录可见；`staff_branch_leads_access`
/// 放宽到本分支；`staff_own_leads_only` 开启时强制仅本人并压过放宽
/// 开关。编辑非本人记录还需要 `staff_edit_permissions`；本人记录
/// 只要可见就可编辑。删除跟随编辑。
fn evaluate_staff(
    is_owner: bool,
    same_branch: bool,
    snapshot: &PolicySnapshot,
    redaction: RedactionFlags,
) -> VisibilityDecision {
    let own_only = snapshot.enabled_or(keys::STAFF_OWN_LEADS_ONLY, false);
    let branch_access = snapshot.enabled_or(keys::STAFF_BRANCH_LEADS_ACCESS, false);

    // 仅本人开启时压过分支放宽（最严格者胜）
    let can_view = if own_only {
        is_owner
    } else {
        is_owner || (branch_access && same_branch)
    };

    let can_edit =
        can_view && (is_owner || snapshot.enabled_or(keys::STAFF_EDIT_PERMISSIONS, false));

    VisibilityDecision {
        can_view,
        can_edit,
        can_delete: can_edit,
        redaction,
    }
}

/// 全局脱敏开关，对每次评估无条件计算
pub fn redaction_flags(snapshot: &PolicySnapshot) -> RedactionFlags {
    RedactionFlags {
        hide_contact_details: snapshot.enabled_or(keys::HIDE_CONTACT_DETAILS, false),
        anonymize_customer_data: snapshot.enabled_or(keys::ANONYMIZE_CUSTOMER_DATA, false),
    }
}

/// 过滤出主体可见的记录
///
/// 稳定的子序列选择：保持输入顺序，绝不重排。整个过滤用同一个
/// 快照，保证一次列表里的所有记录按同一个策略版本判定。
pub fn filter_visible(actor: &Actor, records: Vec<Lead>, snapshot: &PolicySnapshot) -> Vec<Lead> {
    records
        .into_iter()
        .filter(|record| evaluate(actor, record, snapshot).can_view)
        .collect()
}
