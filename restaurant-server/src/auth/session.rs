//! 会话令牌服务
//!
//! 登录成功后在服务端登记一个会话 ID，并把携带该 ID 的签名令牌
//! (HS256) 写入 `admin_session` Cookie。校验时同时检查签名、过期时间、
//! 会话是否仍然有效以及 `admin` 角色。登出会在服务端吊销会话 ID，
//! 所以被复制的令牌也随之失效。

use chrono::{Duration, Utc};
use dashmap::DashMap;
use http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::config::ConfigError;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "admin_session";

/// Role granted by a successful login
pub const ADMIN_ROLE: &str = "admin";

const MIN_SECRET_LEN: usize = 32;

/// 会话配置
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 签名密钥 (至少 32 字节)
    pub secret: String,
    /// 会话有效期 (分钟)
    pub ttl_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
    /// Cookie 是否带 Secure 属性
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// 默认参数 + 指定密钥
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes: 720,
            issuer: "restaurant-server".to_string(),
            audience: "restaurant-admin".to_string(),
            cookie_secure: false,
        }
    }

    /// 从环境变量加载
    ///
    /// `SESSION_COOKIE_SECURE` 未设置时，生产环境默认开启 Secure。
    pub fn from_env(production: bool) -> Result<Self, ConfigError> {
        let mut config = Self::with_secret(load_session_secret()?);
        config.ttl_minutes = std::env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(config.ttl_minutes);
        config.cookie_secure =
            cookie_secure_setting(std::env::var("SESSION_COOKIE_SECURE").ok().as_deref(), production);
        Ok(config)
    }
}

/// `SESSION_COOKIE_SECURE` value, or the environment default when unset/invalid
fn cookie_secure_setting(raw: Option<&str>, production: bool) -> bool {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(production)
}

/// 从环境变量加载会话密钥
fn load_session_secret() -> Result<String, ConfigError> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(ConfigError::Invalid {
                    name: "SESSION_SECRET",
                    reason: format!("must be at least {} characters long", MIN_SECRET_LEN),
                });
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!(
                    "⚠️  SESSION_SECRET not set! Generating temporary key for development."
                );
                generate_printable_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(ConfigError::Missing("SESSION_SECRET"))
            }
        }
    }
}

/// 生成 64 位可打印随机字符串 (开发环境密钥/密码)
pub fn generate_printable_secret() -> Result<String, ConfigError> {
    const ALLOWED: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| ConfigError::RandomFailed)?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// 令牌中的 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (固定为 admin)
    pub sub: String,
    /// 服务端会话 ID
    pub sid: String,
    /// 角色
    pub role: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

impl SessionClaims {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Session expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Session revoked or unknown")]
    Revoked,

    #[error("Session lacks the admin role")]
    NotAdmin,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// 会话服务
#[derive(Debug)]
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// session id → 过期时间戳 (秒)
    active: DashMap<String, i64>,
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            active: DashMap::new(),
        }
    }

    /// 登录成功后开启新会话，返回签名令牌
    pub fn open(&self) -> Result<String, SessionError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.ttl_minutes);

        self.prune_expired(now.timestamp());

        let sid = Uuid::new_v4().to_string();
        let claims = SessionClaims {
            sub: ADMIN_ROLE.to_string(),
            sid: sid.clone(),
            role: ADMIN_ROLE.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))?;

        self.active.insert(sid, claims.exp);
        Ok(token)
    }

    /// 校验令牌：签名、过期、会话是否有效、角色
    pub fn validate(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let claims = self.decode(token)?;

        let still_active = self
            .active
            .get(&claims.sid)
            .is_some_and(|exp| *exp > Utc::now().timestamp());
        if !still_active {
            return Err(SessionError::Revoked);
        }

        if !claims.is_admin() {
            return Err(SessionError::NotAdmin);
        }

        Ok(claims)
    }

    /// 吊销令牌对应的会话 (令牌无效时无操作)
    pub fn close(&self, token: &str) -> Option<String> {
        let claims = self.decode(token).ok()?;
        self.active.remove(&claims.sid).map(|(sid, _)| sid)
    }

    /// 当前有效会话数
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// 登录 Cookie
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.config.ttl_minutes * 60
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// 清除 Cookie
    pub fn cleared_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            SESSION_COOKIE
        );
        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                    ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                    _ => SessionError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    fn prune_expired(&self, now: i64) {
        self.active.retain(|_, exp| *exp > now);
    }
}

/// 从 Cookie 头中读取指定名称的值
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn service() -> SessionService {
        SessionService::new(SessionConfig::with_secret(
            generate_printable_secret().unwrap(),
        ))
    }

    #[test]
    fn test_cookie_secure_defaults_follow_environment() {
        assert!(cookie_secure_setting(None, true));
        assert!(!cookie_secure_setting(None, false));
        assert!(!cookie_secure_setting(Some("false"), true));
        assert!(cookie_secure_setting(Some("true"), false));
        assert!(cookie_secure_setting(Some("yes"), true));
    }

    #[test]
    fn test_open_and_validate() {
        let service = service();
        let token = service.open().expect("Failed to open session");

        let claims = service.validate(&token).expect("Failed to validate token");
        assert_eq!(claims.role, ADMIN_ROLE);
        assert!(claims.is_admin());
        assert_eq!(service.active_count(), 1);
    }

    #[test]
    fn test_closed_session_is_rejected() {
        let service = service();
        let token = service.open().unwrap();

        assert!(service.close(&token).is_some());
        assert!(matches!(
            service.validate(&token),
            Err(SessionError::Revoked)
        ));
        assert!(service.close(&token).is_none());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = service().open().unwrap();
        assert!(matches!(
            service().validate(&token),
            Err(SessionError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            service().validate("not-a-token"),
            Err(SessionError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_secret_generation() {
        let a = generate_printable_secret().unwrap();
        let b = generate_printable_secret().unwrap();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_cookie_attributes() {
        let mut config = SessionConfig::with_secret(generate_printable_secret().unwrap());
        config.cookie_secure = true;
        let service = SessionService::new(config);

        let cookie = service.session_cookie("abc");
        assert!(cookie.starts_with("admin_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));
        assert!(service.cleared_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=tok123"),
        );
        headers.append(http::header::COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("tok123"));
        assert_eq!(read_cookie(&headers, "other"), Some("1"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }
}
