use tracing::info;

use super::{
    dto::ContactRequest,
    repo::ContactStore,
    repo_types::{ContactMessage, NewContact},
};
use crate::{
    auth::services::is_valid_email,
    error::{ApiResult, FieldErrors},
};

pub const MIN_MESSAGE_LEN: usize = 10;

/// Checks every field and reports all failures together.
pub fn validate(req: ContactRequest) -> ApiResult<NewContact> {
    let name = req.name.unwrap_or_default().trim().to_string();
    let email = req.email.unwrap_or_default().trim().to_lowercase();
    let message = req.message.unwrap_or_default().trim().to_string();

    let mut errors = FieldErrors::default();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(&email) {
        errors.add("email", "Please enter a valid email address");
    }
    if message.is_empty() {
        errors.add("message", "Message is required");
    } else if message.chars().count() < MIN_MESSAGE_LEN {
        errors.add(
            "message",
            format!("Message must be at least {MIN_MESSAGE_LEN} characters long"),
        );
    }
    errors.into_result()?;

    Ok(NewContact {
        name,
        email,
        message,
    })
}

pub async fn submit(
    contacts: &dyn ContactStore,
    req: ContactRequest,
) -> ApiResult<ContactMessage> {
    let contact = validate(req)?;
    let saved = contacts.insert(contact).await?;
    info!(contact_id = %saved.id, "contact message stored");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::memory::MemoryStore;

    fn form(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    fn field_errors(err: ApiError) -> FieldErrors {
        match err {
            ApiError::ValidationFailed(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn nine_characters_fail_ten_pass() {
        let err = validate(form("Ann", "ann@x.com", "123456789")).unwrap_err();
        let errors = field_errors(err);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("message"),
            Some("Message must be at least 10 characters long")
        );

        assert!(validate(form("Ann", "ann@x.com", "1234567890")).is_ok());
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let err = validate(form("Ann", "ann@x.com", "   123456789   ")).unwrap_err();
        assert!(field_errors(err).get("message").is_some());
    }

    #[test]
    fn all_errors_are_reported_together() {
        let errors = field_errors(validate(ContactRequest::default()).unwrap_err());
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("message"), Some("Message is required"));

        let errors = field_errors(validate(form(" ", "nope", "short")).unwrap_err());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn fields_are_trimmed_and_email_lowercased() {
        let contact = validate(form("  Ann ", " Ann@X.com ", " Hello there! ")).unwrap();
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.email, "ann@x.com");
        assert_eq!(contact.message, "Hello there!");
    }

    #[tokio::test]
    async fn submit_persists_valid_message() {
        let store = MemoryStore::default();
        let saved = submit(&store, form("Ann", "ann@x.com", "Please call me back"))
            .await
            .unwrap();
        assert_eq!(saved.email, "ann@x.com");
        assert_eq!(store.contact_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_message_is_not_persisted() {
        let store = MemoryStore::default();
        assert!(submit(&store, form("Ann", "ann@x.com", "too short")).await.is_err());
        assert_eq!(store.contact_count().await, 0);
    }
}
