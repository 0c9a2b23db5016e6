//! Privacy settings repository (隐私设置数据访问)

use crate::{error::AppError, models::privacy::PrivacySetting};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PrivacyRepository {
    db: PgPool,
}

impl PrivacyRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出全部设置（按键排序，顺序稳定）
    pub async fn list(&self) -> Result<Vec<PrivacySetting>, AppError> {
        let settings = sqlx::query_as::<_, PrivacySetting>(
            "SELECT * FROM privacy_settings ORDER BY setting_key",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(settings)
    }

    /// 按 ID 查找设置
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<PrivacySetting>, AppError> {
        let setting =
            sqlx::query_as::<_, PrivacySetting>("SELECT * FROM privacy_settings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(setting)
    }

    /// 翻转设置
    ///
    /// 单行原子覆盖。并发翻转同一行由行锁定序，后写者胜，布尔值
    /// 不存在丢失更新。
    pub async fn set_enabled(
        &self,
        id: Uuid,
        is_enabled: bool,
    ) -> Result<Option<PrivacySetting>, AppError> {
        let setting = sqlx::query_as::<_, PrivacySetting>(
            r#"
            UPDATE privacy_settings
            SET is_enabled = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(is_enabled)
        .fetch_optional(&self.db)
        .await?;

        Ok(setting)
    }
}
