//! JWT validation
//! HS256 访问令牌的校验；签发方是外部身份服务，这里保留一个
//! 签发函数供测试和本地工具铸造令牌。

use crate::{config::AppConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 访问令牌声明
///
/// role 和 permissions 保持字符串形态，解析成领域类型在中间件里
/// 完成：未知角色落到 fail-closed 的 Unknown，未知模块逐项丢弃，
/// 坏声明不会让整个令牌失效。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject（主体 ID）
    pub sub: String,

    /// 角色字符串（admin/manager/staff）
    pub role: String,

    /// 分支 ID（manager/staff 必填，admin 可空）
    pub branch_id: Option<Uuid>,

    /// 可导航模块 ID 列表
    pub permissions: Vec<String>,

    /// 签发时间
    pub iat: i64,

    /// 过期时间
    pub exp: i64,

    /// 令牌唯一标识
    pub jti: String,
}

/// JWT 校验服务
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
}

impl JwtService {
    /// 从配置构造
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 要求至少 32 字节
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_exp_secs: config.security.access_token_exp_secs,
        })
    }

    /// 铸造访问令牌（测试与本地工具用；生产签发在身份服务）
    pub fn generate_access_token(
        &self,
        actor_id: &Uuid,
        role: &str,
        branch_id: Option<Uuid>,
        permissions: Vec<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.access_token_exp_secs as i64);

        let claims = Claims {
            sub: actor_id.to_string(),
            role: role.to_string(),
            branch_id,
            permissions,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal
        })
    }

    /// 校验访问令牌
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    #[test]
    fn test_token_roundtrip() {
        let config = test_config();
        let service = JwtService::from_config(&config).unwrap();

        let actor_id = Uuid::new_v4();
        let branch = Some(Uuid::new_v4());
        let token = service
            .generate_access_token(&actor_id, "staff", branch, vec!["vehicles".to_string()])
            .unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, actor_id.to_string());
        assert_eq!(claims.role, "staff");
        assert_eq!(claims.branch_id, branch);
        assert_eq!(claims.permissions, vec!["vehicles".to_string()]);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = test_config();
        let service = JwtService::from_config(&config).unwrap();

        assert!(service.validate_access_token("not-a-token").is_err());
    }
}
