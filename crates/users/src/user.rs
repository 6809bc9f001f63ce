use serde::{Deserialize, Serialize};

use userhub_core::{DomainError, DomainResult, Entity, UserId};

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Materialize a draft under the given id.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Client-supplied user attributes (create and update payload).
///
/// Missing fields decode as empty strings so that absence is reported by
/// validation rather than by the decoder. Capitalized keys (`Name`, `Email`)
/// are accepted too. Unknown fields, including a client-supplied `id`, are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Email")]
    pub email: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Decode a JSON request body into a draft.
///
/// A `null` body decodes to an empty draft, which validation then rejects.
pub fn decode_draft(body: &[u8]) -> DomainResult<UserDraft> {
    serde_json::from_slice::<Option<UserDraft>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| DomainError::decode(e.to_string()))
}

/// Check a create payload: name and email must both be non-empty.
pub fn validate_create(draft: &UserDraft) -> DomainResult<()> {
    require_fields(draft)
}

/// Check an update payload.
///
/// Updates replace the whole record, so they carry the same requirements as
/// creates.
pub fn validate_update(draft: &UserDraft) -> DomainResult<()> {
    require_fields(draft)
}

fn require_fields(draft: &UserDraft) -> DomainResult<()> {
    if draft.name.is_empty() || draft.email.is_empty() {
        return Err(DomainError::validation("name and email are required"));
    }
    Ok(())
}
