//! Author Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorError;

/// 作者唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(Uuid);

impl AuthorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 作者姓名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName(String);

impl AuthorName {
    pub const MAX_CHARS: usize = 200;

    pub fn new(name: impl Into<String>) -> Result<Self, AuthorError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AuthorError::InvalidName("姓名不能为空"));
        }
        if name.chars().count() > Self::MAX_CHARS {
            return Err(AuthorError::InvalidName("姓名长度不能超过200字符"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 邮箱地址
///
/// 只做形状校验: `local@domain`，domain 中至少包含一个点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, AuthorError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(AuthorError::InvalidEmail("邮箱不能为空"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(AuthorError::InvalidEmail("邮箱不能包含空白字符"));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or(AuthorError::InvalidEmail("邮箱缺少 @"))?;
        if local.is_empty() || domain.contains('@') {
            return Err(AuthorError::InvalidEmail("邮箱格式不正确"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(AuthorError::InvalidEmail("邮箱域名格式不正确"));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_name_is_trimmed() {
        let name = AuthorName::new("  Gabriel García Márquez ").unwrap();
        assert_eq!(name.as_str(), "Gabriel García Márquez");
    }

    #[test]
    fn test_author_name_rejects_blank() {
        assert!(AuthorName::new("   ").is_err());
        assert!(AuthorName::new("x".repeat(201)).is_err());
    }

    #[test]
    fn test_email_accepts_common_shapes() {
        assert!(Email::new("ana@example.com").is_ok());
        assert!(Email::new("first.last+tag@mail.example.org").is_ok());
    }

    #[test]
    fn test_email_rejects_malformed() {
        for bad in ["", "plain", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@.com", "a@c."] {
            assert!(Email::new(bad).is_err(), "expected {:?} to be rejected", bad);
        }
    }
}
