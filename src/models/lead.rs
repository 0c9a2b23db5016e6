//! Lead domain model
//! 线索记录、请求/响应 DTO、可见性判定结果与脱敏输出

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 线索记录
///
/// 策略只关心 owner_id / branch_id，其余都是业务字段。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    /// 创建该线索的 staff 主体
    pub owner_id: Uuid,
    pub branch_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle_model: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 字段脱敏标记
///
/// 不改变三个布尔判定，只告知渲染层联系字段必须脱敏。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RedactionFlags {
    pub hide_contact_details: bool,
    pub anonymize_customer_data: bool,
}

/// 单条记录的可见性判定结果
///
/// 每次评估重新推导，绝不跨设置变更缓存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityDecision {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub redaction: RedactionFlags,
}

impl VisibilityDecision {
    /// 最严格情形：仅 owner 可见，禁改禁删
    pub fn denied_except_owner(is_owner: bool, redaction: RedactionFlags) -> Self {
        Self {
            can_view: is_owner,
            can_edit: false,
            can_delete: false,
            redaction,
        }
    }
}

/// 创建线索请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(length(min = 3, max = 32))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(max = 100))]
    pub vehicle_model: Option<String>,
    #[validate(length(max = 50))]
    pub source: Option<String>,
    pub notes: Option<String>,
    /// 仅 admin 可以显式指定分支；其他角色取主体自己的分支
    pub branch_id: Option<Uuid>,
}

/// 更新线索请求（字段为空表示不变）
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub customer_phone: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(max = 100))]
    pub vehicle_model: Option<String>,
    #[validate(length(max = 50))]
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// 对外响应 DTO；联系字段按脱敏标记处理后输出
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub branch_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub vehicle_model: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadResponse {
    /// 应用脱敏标记构造响应
    pub fn redacted(lead: Lead, flags: RedactionFlags) -> Self {
        let customer_name = if flags.anonymize_customer_data {
            anonymize_name(&lead.customer_name)
        } else {
            lead.customer_name
        };

        let (customer_phone, customer_email) = if flags.hide_contact_details {
            (lead.customer_phone.map(|_| REDACTED.to_string()),
             lead.customer_email.map(|_| REDACTED.to_string()))
        } else {
            (lead.customer_phone, lead.customer_email)
        };

        Self {
            id: lead.id,
            owner_id: lead.owner_id,
            branch_id: lead.branch_id,
            customer_name,
            customer_phone,
            customer_email,
            vehicle_model: lead.vehicle_model,
            source: lead.source,
            status: lead.status,
            notes: lead.notes,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

const REDACTED: &str = "***";

/// 客户姓名匿名化：保留首字符，其余遮蔽
fn anonymize_name(name: &str) -> String {
    match name.chars().next() {
        Some(first) => format!("{first}***"),
        None => REDACTED.to_string(),
    }
}

/// 按状态聚合的线索统计
#[derive(Debug, Serialize)]
pub struct LeadStatistics {
    pub total: usize,
    pub by_status: std::collections::HashMap<String, usize>,
}

impl LeadStatistics {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut by_status: std::collections::HashMap<String, usize> =
            std::collections::HashMap::new();
        for lead in leads {
            *by_status.entry(lead.status.clone()).or_insert(0) += 1;
        }
        Self {
            total: leads.len(),
            by_status,
        }
    }
}
