//! Auth Module Tests
//!
//! ## Test Scopes
//! - **Registration**: Required fields, email normalization, duplicates.
//! - **Local strategy**: Credential checks.
//! - **Delegate**: Redirect targets and flash messages for both outcomes.

#[cfg(test)]
mod tests {
    use crate::auth::delegate::*;
    use crate::auth::handlers::{handle_login, handle_register};
    use crate::auth::types::*;
    use crate::auth::users::{LOCAL_STRATEGY, UserDirectory, normalize_email};
    use crate::error::AppError;

    use axum::http::{StatusCode, header};
    use axum::response::IntoResponse;
    use axum::{Extension, Form, Json};
    use std::sync::Arc;

    fn registered() -> (Arc<UserDirectory>, User) {
        let users = Arc::new(UserDirectory::new());
        let user = users
            .register(&RegisterInput {
                name: "Wes".to_string(),
                email: "Wes@Example.com ".to_string(),
                password: "hunter2".to_string(),
            })
            .unwrap();
        (users, user)
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    // ============================================================
    // REGISTRATION TESTS
    // ============================================================

    #[test]
    fn test_register_normalizes_email_and_hides_digest() {
        let (users, user) = registered();

        assert_eq!(user.email, "wes@example.com");
        assert!(users.exists(&user.id));

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_digest").is_none());
        assert!(json.get("salt").is_none());
        assert_eq!(json["name"], "Wes");
    }

    #[test]
    fn test_register_rejects_duplicates_and_bad_input() {
        let (users, _) = registered();

        let dup = users.register(&RegisterInput {
            name: "Other".to_string(),
            email: "WES@example.com".to_string(),
            password: "x".to_string(),
        });
        assert!(matches!(dup, Err(AppError::EmailTaken(_))));

        for (name, email, password) in [
            ("", "a@b.c", "pw"),
            ("A", "not-an-email", "pw"),
            ("A", "a@b.c", ""),
        ] {
            let result = users.register(&RegisterInput {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            });
            assert!(matches!(result, Err(AppError::MalformedPayload(_))));
        }
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@B.com "), Some("a@b.com".to_string()));
        assert_eq!(normalize_email("@b.com"), None);
        assert_eq!(normalize_email("a@"), None);
        assert_eq!(normalize_email("a@b@c"), None);
    }

    // ============================================================
    // STRATEGY TESTS
    // ============================================================

    #[test]
    fn test_local_strategy_checks_credentials() {
        let (users, user) = registered();

        assert_eq!(users.name(), LOCAL_STRATEGY);
        assert_eq!(
            users.authenticate(&creds("wes@example.com", "hunter2")).unwrap().id,
            user.id
        );
        assert_eq!(
            users.authenticate(&creds("wes@example.com", "wrong")).unwrap_err(),
            AuthFailure::WrongPassword
        );
        assert_eq!(
            users.authenticate(&creds("nobody@example.com", "hunter2")).unwrap_err(),
            AuthFailure::UnknownEmail
        );
        assert_eq!(
            users.authenticate(&creds("", "")).unwrap_err(),
            AuthFailure::MissingCredentials
        );
    }

    // ============================================================
    // DELEGATE TESTS
    // ============================================================

    #[test]
    fn test_login_success_redirects_home_with_flash() {
        let (users, user) = registered();
        let delegate = LoginDelegate::new(users);

        let redirect = delegate.login(&creds("WES@example.com", "hunter2"));

        assert_eq!(redirect.location, SUCCESS_REDIRECT);
        assert_eq!(redirect.flash, Flash::success("You are now logged in!"));
        assert_eq!(redirect.user, Some(user.id));
    }

    #[test]
    fn test_login_failure_redirects_to_login_with_flash() {
        let (users, _) = registered();
        let delegate = LoginDelegate::new(users);

        for attempt in [creds("wes@example.com", "nope"), creds("", "")] {
            let redirect = delegate.login(&attempt);
            assert_eq!(redirect.location, "/login");
            assert_eq!(redirect.flash, Flash::error("Failed Login!"));
            assert_eq!(redirect.user, None);
        }
    }

    #[test]
    fn test_redirect_response_sets_location_and_flash_cookie() {
        let redirect = LoginRedirect {
            location: FAILURE_REDIRECT.to_string(),
            flash: Flash::error(FAILURE_FLASH),
            user: None,
        };

        let response = redirect.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        assert_eq!(
            response.headers()[header::SET_COOKIE],
            "flash=error:Failed%20Login%21; Path=/; Max-Age=60; SameSite=Lax; HttpOnly"
        );
    }

    // ============================================================
    // HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_register_then_login_handlers() {
        let users = Arc::new(UserDirectory::new());
        let delegate = Arc::new(LoginDelegate::new(users.clone()));

        let (status, Json(user)) = handle_register(
            Extension(users.clone()),
            Json(RegisterInput {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "engine".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let redirect = handle_login(
            Extension(delegate.clone()),
            Form(creds("ada@example.com", "engine")),
        )
        .await;
        assert_eq!(redirect.location, "/");
        assert_eq!(redirect.user, Some(user.id));

        let redirect = handle_login(Extension(delegate), Form(Credentials::default())).await;
        assert_eq!(redirect.location, "/login");
    }
}
