//! JWT token management
//!
//! 登录成功后签发带用户名与角色的限时令牌

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, Result};

/// 令牌声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// 用户名
    pub sub: String,
    /// 账户角色
    pub role: String,
    /// 签发时间（Unix 秒）
    pub iat: i64,
    /// 过期时间（Unix 秒）
    pub exp: i64,
}

/// JWT token manager
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: i64,
}

impl JwtManager {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 seconds tolerance

        Self {
            encoding_key,
            decoding_key,
            validation,
            expires_in: config.jwt_expires_in,
        }
    }

    /// 签发访问令牌
    pub fn generate_token(&self, username: &str, role: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.expires_in,
        };

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
    }

    /// 校验并解析令牌
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        let token_data: TokenData<JwtClaims> = decode(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token expired".to_string())
                }
                _ => AppError::Unauthorized(format!("Token validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
