//! Lead repository (线索数据访问)

use crate::{
    error::AppError,
    models::lead::{CreateLeadRequest, Lead, UpdateLeadRequest},
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct LeadRepository {
    db: PgPool,
}

impl LeadRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出全部线索（创建时间倒序）
    ///
    /// 这里返回的是未过滤的原始集合，只允许 LeadService 消费。
    pub async fn list(&self) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(&self.db)
            .await?;

        Ok(leads)
    }

    /// 按 ID 查找线索
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(lead)
    }

    /// 创建线索
    pub async fn create(
        &self,
        owner_id: Uuid,
        branch_id: Uuid,
        req: &CreateLeadRequest,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                owner_id, branch_id, customer_name, customer_phone,
                customer_email, vehicle_model, source, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'new', $8)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(branch_id)
        .bind(&req.customer_name)
        .bind(&req.customer_phone)
        .bind(&req.customer_email)
        .bind(&req.vehicle_model)
        .bind(&req.source)
        .bind(&req.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(lead)
    }

    /// 更新线索（空字段保持不变）
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateLeadRequest,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET
                customer_name = COALESCE($2, customer_name),
                customer_phone = COALESCE($3, customer_phone),
                customer_email = COALESCE($4, customer_email),
                vehicle_model = COALESCE($5, vehicle_model),
                status = COALESCE($6, status),
                notes = COALESCE($7, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.customer_name)
        .bind(&req.customer_phone)
        .bind(&req.customer_email)
        .bind(&req.vehicle_model)
        .bind(&req.status)
        .bind(&req.notes)
        .fetch_optional(&self.db)
        .await?;

        Ok(lead)
    }

    /// 删除线索
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
