//! Author Context - Aggregate Root

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthorError, AuthorId, AuthorName, Email};

/// 作者的可选资料
///
/// 空白字符串视为未填写
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    bio: Option<String>,
    nationality: Option<String>,
    birth_year: Option<i32>,
}

impl AuthorProfile {
    pub fn new(
        bio: Option<String>,
        nationality: Option<String>,
        birth_year: Option<i32>,
    ) -> Result<Self, AuthorError> {
        if let Some(year) = birth_year {
            if year > Utc::now().year() {
                return Err(AuthorError::InvalidBirthYear(year));
            }
        }

        Ok(Self {
            bio: non_blank(bio),
            nationality: non_blank(nationality),
            birth_year,
        })
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Author 聚合根
///
/// 不变量:
/// - 姓名与邮箱始终有效
/// - 邮箱在全体作者中唯一（由仓储保证）
/// - 删除作者时其名下图书一并删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    id: AuthorId,
    name: AuthorName,
    email: Email,
    profile: AuthorProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Author {
    /// 创建新作者
    pub fn new(name: AuthorName, email: Email, profile: AuthorProfile) -> Self {
        let now = Utc::now();
        Self {
            id: AuthorId::new(),
            name,
            email,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从持久化数据重建
    pub fn restore(
        id: AuthorId,
        name: AuthorName,
        email: Email,
        profile: AuthorProfile,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            profile,
            created_at,
            updated_at,
        }
    }

    /// 整体替换可编辑字段
    pub fn revise(&mut self, name: AuthorName, email: Email, profile: AuthorProfile) {
        self.name = name;
        self.email = email;
        self.profile = profile;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> &AuthorId {
        &self.id
    }

    pub fn name(&self) -> &AuthorName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn profile(&self) -> &AuthorProfile {
        &self.profile
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_author() -> Author {
        Author::new(
            AuthorName::new("Isabel Allende").unwrap(),
            Email::new("isabel@example.com").unwrap(),
            AuthorProfile::default(),
        )
    }

    #[test]
    fn test_profile_blank_fields_become_absent() {
        let profile = AuthorProfile::new(
            Some("   ".to_string()),
            Some(" Chilena ".to_string()),
            Some(1942),
        )
        .unwrap();

        assert_eq!(profile.bio(), None);
        assert_eq!(profile.nationality(), Some("Chilena"));
        assert_eq!(profile.birth_year(), Some(1942));
    }

    #[test]
    fn test_profile_rejects_future_birth_year() {
        let next_year = Utc::now().year() + 1;
        assert!(AuthorProfile::new(None, None, Some(next_year)).is_err());
    }

    #[test]
    fn test_revise_keeps_identity() {
        let mut author = sample_author();
        let id = *author.id();
        let created_at = author.created_at();

        author.revise(
            AuthorName::new("Isabel Allende Llona").unwrap(),
            Email::new("allende@example.com").unwrap(),
            AuthorProfile::new(None, Some("Chilena".to_string()), Some(1942)).unwrap(),
        );

        assert_eq!(*author.id(), id);
        assert_eq!(author.created_at(), created_at);
        assert_eq!(author.name().as_str(), "Isabel Allende Llona");
        assert_eq!(author.email().as_str(), "allende@example.com");
        assert!(author.updated_at() >= created_at);
    }
}
