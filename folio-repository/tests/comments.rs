mod common;

use common::setup_db;
use folio_models::{
    domain::prelude::{CommentPageParams, NewBlogComment, NewBlogPost},
    enums::common::PublicationStatus,
};
use folio_repository::{BlogCommentRepository, BlogPostRepository};
use sea_orm::DatabaseConnection;

async fn published_post(db: &DatabaseConnection) -> i32 {
    let post = NewBlogPost {
        title: "Launch notes".into(),
        slug: None,
        excerpt: "What shipped".into(),
        content: "Everything".into(),
        cover_image: None,
        tags: vec![],
        status: PublicationStatus::Published,
    };
    BlogPostRepository::create(post.into_active_model(None).unwrap(), db)
        .await
        .unwrap()
        .id
}

fn comment(name: &str) -> NewBlogComment {
    NewBlogComment {
        name: name.into(),
        email: "Jo@Example.com".into(),
        content: "Great read".into(),
        rating: 5,
    }
}

#[tokio::test]
async fn comments_stay_hidden_until_approved() {
    let db = setup_db().await;
    let post_id = published_post(&db).await;

    let stored = BlogCommentRepository::create(comment("Jo").into_active_model(post_id), &db)
        .await
        .unwrap();
    assert!(!stored.is_approved);
    assert_eq!(stored.author_email, "jo@example.com");
    assert!(BlogCommentRepository::find_approved_by_post(post_id, &db)
        .await
        .unwrap()
        .is_empty());

    let approved = BlogCommentRepository::moderate(stored.id, true, &db)
        .await
        .unwrap();
    assert!(approved.is_approved);

    let public = BlogCommentRepository::find_approved_by_post(post_id, &db)
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, stored.id);
}

#[tokio::test]
async fn moderation_stats_and_filters() {
    let db = setup_db().await;
    let post_id = published_post(&db).await;
    let first = BlogCommentRepository::create(comment("Ann").into_active_model(post_id), &db)
        .await
        .unwrap();
    BlogCommentRepository::create(comment("Bob").into_active_model(post_id), &db)
        .await
        .unwrap();
    BlogCommentRepository::moderate(first.id, true, &db)
        .await
        .unwrap();

    let params = CommentPageParams {
        post_id: Some(post_id),
        approved: Some(false),
        ..Default::default()
    };
    let result = BlogCommentRepository::page(&params, &db).await.unwrap();
    assert_eq!(result.page.total, 1);
    assert_eq!(result.page.records[0].author_name, "Bob");
    assert_eq!(result.stats.total, 2);
    assert_eq!(result.stats.approved, 1);
    assert_eq!(result.stats.pending, 1);
}

#[tokio::test]
async fn deleting_a_post_removes_its_comments() {
    let db = setup_db().await;
    let post_id = published_post(&db).await;
    let stored = BlogCommentRepository::create(comment("Jo").into_active_model(post_id), &db)
        .await
        .unwrap();

    BlogPostRepository::delete(post_id, &db).await.unwrap();
    assert!(BlogCommentRepository::find_by_id(stored.id, &db)
        .await
        .unwrap()
        .is_none());
}
