//! Review Module Tests
//!
//! ## Test Scopes
//! - **ReviewStore**: The store-id join and ordering.
//! - **Handlers**: Author checks and status codes.

#[cfg(test)]
mod tests {
    use crate::auth::types::RegisterInput;
    use crate::auth::users::UserDirectory;
    use crate::error::AppError;
    use crate::reviews::handlers::handle_add_review;
    use crate::reviews::memory::ReviewStore;
    use crate::reviews::types::{Review, ReviewId, ReviewInput};
    use crate::stores::service::StoreService;
    use crate::stores::slug::SlugPolicy;
    use crate::stores::types::{LocationInput, StoreId, StoreInput, UserId};

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::{Extension, Json};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn review(store: &StoreId, rating: u8, minutes_ago: i64) -> Review {
        Review {
            id: ReviewId::new(),
            store: store.clone(),
            author: UserId::new(),
            text: format!("{rating} stars"),
            rating,
            created: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_load_reviews_for_joins_by_store() {
        let reviews = ReviewStore::new();
        let reviewed = StoreId::new();
        let other = StoreId::new();
        let quiet = StoreId::new();

        reviews.insert(review(&reviewed, 4, 1));
        reviews.insert(review(&reviewed, 2, 10));
        reviews.insert(review(&other, 5, 1));

        let joined = reviews.load_reviews_for(&[reviewed.clone(), quiet.clone()]);

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[&quiet].len(), 0);
        let ratings: Vec<u8> = joined[&reviewed].iter().map(|r| r.rating).collect();
        // Oldest first.
        assert_eq!(ratings, vec![2, 4]);
        assert!(!joined.contains_key(&other));
        assert_eq!(reviews.len(), 3);
    }

    #[tokio::test]
    async fn test_handle_add_review() {
        let stores = StoreService::new(SlugPolicy::NextFree);
        let users = Arc::new(UserDirectory::new());
        let user = users
            .register(&RegisterInput {
                name: "Kim".to_string(),
                email: "kim@example.com".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        let store = stores
            .create(&StoreInput {
                name: Some("Cafe".to_string()),
                location: LocationInput {
                    coordinates: vec![1.0, 2.0],
                    address: Some("Main St".to_string()),
                },
                author: Some(user.id.clone()),
                ..Default::default()
            })
            .unwrap();

        let (status, Json(created)) = handle_add_review(
            Extension(stores.clone()),
            Extension(users.clone()),
            Path(store.id.0.clone()),
            Json(ReviewInput {
                author: user.id.clone(),
                text: " Lovely ".to_string(),
                rating: 4,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.text, "Lovely");
        assert_eq!(created.store, store.id);

        let err = handle_add_review(
            Extension(stores),
            Extension(users),
            Path(store.id.0.clone()),
            Json(ReviewInput {
                author: UserId::new(),
                text: String::new(),
                rating: 4,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownAuthor(_)));
    }
}
