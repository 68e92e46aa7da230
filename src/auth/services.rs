use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::RegisterRequest,
    password::{hash as hash_password, verify as verify_password},
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::error::{ApiError, ApiResult, FieldErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose `local@domain.tld` shape check.
pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^\S+@\S+\.\S+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(req: RegisterRequest) -> ApiResult<(String, String, String)> {
    let name = req.name.unwrap_or_default().trim().to_string();
    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    let password = req.password.unwrap_or_default();

    let mut errors = FieldErrors::default();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(&email) {
        errors.add("email", "Please enter a valid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    errors.into_result()?;
    Ok((name, email, password))
}

/// Creates an account; fails with `DuplicateAccount` if the email is taken.
pub async fn register(users: &dyn UserStore, req: RegisterRequest) -> ApiResult<User> {
    let (name, email, password) = validate_registration(req)?;

    if users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateAccount);
    }

    let password_hash = hash_password(password).await?;

    // The unique index still decides if two registrations race past the check above.
    let user = users
        .create(NewUser {
            name,
            email,
            password_hash,
        })
        .await?
        .ok_or(ApiError::DuplicateAccount)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Checks an email/password pair. Unknown email and wrong password are the same error.
pub async fn authenticate(users: &dyn UserStore, email: &str, password: &str) -> ApiResult<User> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::InvalidCredentials);
    }

    let Some(user) = users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(password.to_string(), user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(user)
}

/// Loads the caller's record. A valid token for a vanished account is treated as invalid.
pub async fn get_profile(users: &dyn UserStore, user_id: Uuid) -> ApiResult<User> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::TokenInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn req(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ann@x.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("ann@x"));
        assert!(!is_valid_email("ann x@y.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let store = MemoryStore::default();
        let user = register(&store, req("Ann", "ann@x.com", "secret1")).await.unwrap();
        assert_eq!(user.name, "Ann");
        assert_ne!(user.password_hash, "secret1");

        let logged_in = authenticate(&store, "ann@x.com", "secret1").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_case_insensitive() {
        let store = MemoryStore::default();
        register(&store, req("Ann", "ann@x.com", "secret1")).await.unwrap();
        let err = register(&store, req("Ann 2", "  ANN@X.com ", "secret2"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateAccount));
    }

    #[tokio::test]
    async fn login_email_is_case_insensitive() {
        let store = MemoryStore::default();
        register(&store, req("Ann", "Ann@X.com", "secret1")).await.unwrap();
        assert!(authenticate(&store, "ann@x.COM", "secret1").await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = MemoryStore::default();
        register(&store, req("Ann", "ann@x.com", "secret1")).await.unwrap();

        let wrong = authenticate(&store, "ann@x.com", "secret2").await.unwrap_err();
        let unknown = authenticate(&store, "bob@x.com", "secret1").await.unwrap_err();
        assert!(matches!(wrong, ApiError::InvalidCredentials));
        assert!(matches!(unknown, ApiError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn registration_collects_every_field_error() {
        let store = MemoryStore::default();
        let err = register(&store, RegisterRequest::default()).await.unwrap_err();
        let ApiError::ValidationFailed(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[tokio::test]
    async fn short_password_and_bad_email_rejected() {
        let store = MemoryStore::default();
        let err = register(&store, req("Ann", "ann-at-x", "12345")).await.unwrap_err();
        let ApiError::ValidationFailed(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }

    #[tokio::test]
    async fn profile_for_unknown_user_is_invalid_token() {
        let store = MemoryStore::default();
        let err = get_profile(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::TokenInvalid));
    }
}
