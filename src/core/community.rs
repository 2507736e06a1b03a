//! Community wall posts, customer suggestions, and special item requests.

use crate::errors::{Error, Result};
use crate::models::{timestamp_id, CommunityPost, RequestStatus, SpecialRequest, Suggestion};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use tracing::instrument;

pub async fn get_posts(db: &DatabaseConnection) -> Result<Vec<CommunityPost>> {
    store::read_collection(db, keys::COMMUNITY_POSTS).await
}

/// Publishes a photo post on the wall, newest first.
#[instrument(skip(db, post), fields(author = %post.author_name))]
pub async fn add_post(db: &DatabaseConnection, post: CommunityPost) -> Result<Vec<CommunityPost>> {
    let mut posts = get_posts(db).await?;
    posts.insert(0, post);
    store::write_value(db, keys::COMMUNITY_POSTS, &posts).await?;
    Ok(posts)
}

/// Adds one like to a post; unknown ids are a no-op.
pub async fn like_post(db: &DatabaseConnection, post_id: &str) -> Result<Vec<CommunityPost>> {
    let mut posts = get_posts(db).await?;
    for post in &mut posts {
        if post.id == post_id {
            post.likes += 1;
        }
    }
    store::write_value(db, keys::COMMUNITY_POSTS, &posts).await?;
    Ok(posts)
}

pub async fn get_suggestions(db: &DatabaseConnection) -> Result<Vec<Suggestion>> {
    store::read_collection(db, keys::SUGGESTIONS).await
}

/// Files a free-text suggestion from a customer.
#[instrument(skip(db, author, text), fields(author = %author))]
pub async fn add_suggestion(
    db: &DatabaseConnection,
    author: &str,
    text: &str,
    now_ms: i64,
) -> Result<Vec<Suggestion>> {
    if text.trim().is_empty() {
        return Err(Error::Validation {
            message: "Suggestion text cannot be empty".to_string(),
        });
    }

    let mut suggestions = get_suggestions(db).await?;
    suggestions.insert(
        0,
        Suggestion {
            id: timestamp_id(now_ms),
            author_name: author.to_string(),
            text: text.to_string(),
            date: now_ms,
            read: false,
        },
    );
    store::write_value(db, keys::SUGGESTIONS, &suggestions).await?;
    Ok(suggestions)
}

pub async fn get_special_requests(db: &DatabaseConnection) -> Result<Vec<SpecialRequest>> {
    store::read_collection(db, keys::SPECIAL_REQUESTS).await
}

/// Files a "find me this item" request, starting PENDING.
#[instrument(skip(db, client, item_name, description), fields(client = %client))]
pub async fn add_special_request(
    db: &DatabaseConnection,
    client: &str,
    item_name: &str,
    description: &str,
    now_ms: i64,
) -> Result<Vec<SpecialRequest>> {
    if item_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Requested item name cannot be empty".to_string(),
        });
    }

    let mut requests = get_special_requests(db).await?;
    requests.insert(
        0,
        SpecialRequest {
            id: timestamp_id(now_ms),
            client_name: client.to_string(),
            item_name: item_name.to_string(),
            description: description.to_string(),
            date: now_ms,
            status: RequestStatus::Pending,
        },
    );
    store::write_value(db, keys::SPECIAL_REQUESTS, &requests).await?;
    Ok(requests)
}

/// Moves a special request to a new status.
pub async fn update_request_status(
    db: &DatabaseConnection,
    request_id: &str,
    status: RequestStatus,
) -> Result<Vec<SpecialRequest>> {
    let mut requests = get_special_requests(db).await?;
    for request in &mut requests {
        if request.id == request_id {
            request.status = status;
        }
    }
    store::write_value(db, keys::SPECIAL_REQUESTS, &requests).await?;
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    fn post(id: &str, author: &str) -> CommunityPost {
        CommunityPost {
            id: id.to_string(),
            author_name: author.to_string(),
            author_grade: "6to Grado".to_string(),
            image_url: "https://example.com/foto.jpg".to_string(),
            description: "Mi proyecto de arte".to_string(),
            likes: 0,
            timestamp: 0,
        }
    }

    #[tokio::test]
    async fn test_posts_and_likes() -> Result<()> {
        let db = setup_test_db().await?;

        add_post(&db, post("c1", "Maria")).await?;
        add_post(&db, post("c2", "Pedro")).await?;

        let posts = like_post(&db, "c1").await?;
        assert_eq!(posts[0].author_name, "Pedro");
        assert_eq!(posts[1].likes, 1);

        // Unknown id changes nothing
        let posts = like_post(&db, "nope").await?;
        assert_eq!(posts[1].likes, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_suggestions_start_unread() -> Result<()> {
        let db = setup_test_db().await?;

        let suggestions = add_suggestion(&db, "Maria", "Vendan sharpies", 1_000).await?;
        assert!(!suggestions[0].read);

        let empty = add_suggestion(&db, "Maria", "  ", 2_000).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_special_request_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;

        let requests = add_special_request(
            &db,
            "Pedro",
            "Compás profesional",
            "Para clase de dibujo técnico",
            1_000,
        )
        .await?;
        assert_eq!(requests[0].status, RequestStatus::Pending);

        let requests = update_request_status(&db, &requests[0].id, RequestStatus::Found).await?;
        assert_eq!(requests[0].status, RequestStatus::Found);
        Ok(())
    }
}
