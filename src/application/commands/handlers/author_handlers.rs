//! Author Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateAuthor, DeleteAuthor, UpdateAuthor};
use crate::application::error::ApplicationError;
use crate::application::ports::{AuthorRecord, AuthorRepositoryPort};
use crate::application::queries::handlers::AuthorResponse;
use crate::domain::author::{Author, AuthorName, AuthorProfile, Email};

/// 校验后的可编辑字段
struct ValidatedAuthor {
    name: AuthorName,
    email: Email,
    profile: AuthorProfile,
}

fn validate(
    name: String,
    email: String,
    bio: Option<String>,
    nationality: Option<String>,
    birth_year: Option<i32>,
) -> Result<ValidatedAuthor, ApplicationError> {
    Ok(ValidatedAuthor {
        name: AuthorName::new(name)?,
        email: Email::new(email)?,
        profile: AuthorProfile::new(bio, nationality, birth_year)?,
    })
}

/// 邮箱已被其他作者使用时返回冲突
async fn ensure_email_available(
    author_repo: &dyn AuthorRepositoryPort,
    email: &Email,
    owner: Option<Uuid>,
) -> Result<(), ApplicationError> {
    match author_repo.find_by_email(email.as_str()).await? {
        Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(format!(
            "email already in use: {}",
            email
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// CreateAuthor
// ============================================================================

/// CreateAuthor Handler
pub struct CreateAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl CreateAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, command: CreateAuthor) -> Result<AuthorResponse, ApplicationError> {
        let fields = validate(
            command.name,
            command.email,
            command.bio,
            command.nationality,
            command.birth_year,
        )?;

        ensure_email_available(self.author_repo.as_ref(), &fields.email, None).await?;

        let author = Author::new(fields.name, fields.email, fields.profile);
        let record = AuthorRecord::from(&author);
        self.author_repo.save(&record).await?;

        tracing::info!(
            author_id = %author.id(),
            name = %author.name(),
            "Author created"
        );

        Ok(AuthorResponse::from(record))
    }
}

// ============================================================================
// UpdateAuthor
// ============================================================================

/// UpdateAuthor Handler
pub struct UpdateAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl UpdateAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, command: UpdateAuthor) -> Result<AuthorResponse, ApplicationError> {
        let author_id = command.author_id;

        let existing = self
            .author_repo
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", author_id))?;

        let fields = validate(
            command.name,
            command.email,
            command.bio,
            command.nationality,
            command.birth_year,
        )?;

        ensure_email_available(self.author_repo.as_ref(), &fields.email, Some(author_id)).await?;

        let mut author = Author::try_from(existing)?;
        author.revise(fields.name, fields.email, fields.profile);

        let record = AuthorRecord::from(&author);
        self.author_repo.save(&record).await?;

        tracing::info!(author_id = %author_id, name = %author.name(), "Author updated");

        Ok(AuthorResponse::from(record))
    }
}

// ============================================================================
// DeleteAuthor
// ============================================================================

/// DeleteAuthor Handler - 连同作者的全部图书一起删除
pub struct DeleteAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl DeleteAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, command: DeleteAuthor) -> Result<(), ApplicationError> {
        let author_id = command.author_id;

        // 检查作者是否存在
        let author = self
            .author_repo
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", author_id))?;

        self.author_repo.delete(author_id).await?;

        tracing::info!(author_id = %author_id, name = %author.name, "Author deleted");

        Ok(())
    }
}
