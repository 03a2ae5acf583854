mod common;

use common::{insert_user, setup_db};
use folio_error::storage::StorageError;
use folio_models::{
    domain::prelude::{
        BlogPostPageParams, NewBlogPost, NewService, PageParams, ServicePageParams,
        UpdateBlogPost, UpdateService,
    },
    enums::common::{PublicationStatus, UserRole},
};
use folio_repository::{BlogPostRepository, ServiceRepository};

fn new_service(title: &str, status: PublicationStatus) -> NewService {
    NewService {
        title: title.into(),
        slug: None,
        summary: "Summary".into(),
        content: None,
        icon: None,
        features: vec!["Fast".into()],
        sort_order: 0,
        status,
    }
}

fn new_post(title: &str, status: PublicationStatus, tags: &[&str]) -> NewBlogPost {
    NewBlogPost {
        title: title.into(),
        slug: None,
        excerpt: "Excerpt".into(),
        content: "Body".into(),
        cover_image: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status,
    }
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let db = setup_db().await;
    let active = new_service("Web Design", PublicationStatus::Draft)
        .into_active_model(None)
        .unwrap();
    ServiceRepository::create(active, &db).await.unwrap();

    let again = new_service("Web  Design!", PublicationStatus::Draft)
        .into_active_model(None)
        .unwrap();
    let err = ServiceRepository::create(again, &db).await.unwrap_err();
    assert!(err.is_conflict(), "{err:?}");
    assert_eq!(err.to_string(), "service slug already exists");
}

#[tokio::test]
async fn renaming_onto_an_existing_slug_is_a_conflict() {
    let db = setup_db().await;
    for title in ["Branding", "Hosting"] {
        let active = new_service(title, PublicationStatus::Draft)
            .into_active_model(None)
            .unwrap();
        ServiceRepository::create(active, &db).await.unwrap();
    }
    assert!(ServiceRepository::find_published(&db).await.unwrap().is_empty());

    let page = ServiceRepository::page(&ServicePageParams::default(), &db)
        .await
        .unwrap();
    let hosting_id = page
        .page
        .records
        .iter()
        .find(|s| s.slug == "hosting")
        .unwrap()
        .id;

    let changes = UpdateService {
        id: hosting_id,
        title: None,
        slug: Some("branding".into()),
        summary: None,
        content: None,
        icon: None,
        features: None,
        sort_order: None,
        status: None,
    };
    let err = ServiceRepository::update(changes, &db).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn page_filters_and_counts_per_status() {
    let db = setup_db().await;
    for (title, status) in [
        ("Design", PublicationStatus::Published),
        ("Development", PublicationStatus::Published),
        ("Consulting", PublicationStatus::Draft),
        ("Legacy", PublicationStatus::Archived),
    ] {
        let active = new_service(title, status).into_active_model(None).unwrap();
        ServiceRepository::create(active, &db).await.unwrap();
    }

    let params = ServicePageParams {
        search: Some("de".into()),
        status: Some(PublicationStatus::Published),
        page: PageParams {
            page: Some(1),
            page_size: Some(1),
        },
    };
    let result = ServiceRepository::page(&params, &db).await.unwrap();
    assert_eq!(result.page.total, 2);
    assert_eq!(result.page.pages, 2);
    assert_eq!(result.page.records.len(), 1);
    assert_eq!(result.stats.total, 4);
    assert_eq!(result.stats.published, 2);
    assert_eq!(result.stats.draft, 1);
    assert_eq!(result.stats.archived, 1);

    let public = ServiceRepository::find_published(&db).await.unwrap();
    assert_eq!(public.len(), 2);
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let db = setup_db().await;
    assert!(matches!(
        ServiceRepository::delete(42, &db).await,
        Err(StorageError::EntityNotFound(_))
    ));
    assert!(matches!(
        ServiceRepository::change_status(42, PublicationStatus::Published, &db).await,
        Err(StorageError::EntityNotFound(_))
    ));
}

#[tokio::test]
async fn publishing_a_post_stamps_published_at_once() {
    let db = setup_db().await;
    let author = insert_user(&db, "author@example.com", UserRole::Admin).await;
    let post = BlogPostRepository::create(
        new_post("Hello World", PublicationStatus::Draft, &["rust"])
            .into_active_model(Some(author.id))
            .unwrap(),
        &db,
    )
    .await
    .unwrap();
    assert!(post.published_at.is_none());
    assert!(BlogPostRepository::find_published_by_slug("hello-world", &db)
        .await
        .unwrap()
        .is_none());

    let published = BlogPostRepository::change_status(post.id, PublicationStatus::Published, &db)
        .await
        .unwrap();
    let first_published_at = published.published_at.unwrap();

    let archived = BlogPostRepository::change_status(post.id, PublicationStatus::Archived, &db)
        .await
        .unwrap();
    assert_eq!(archived.published_at, Some(first_published_at));

    let changes = UpdateBlogPost {
        id: post.id,
        title: None,
        slug: None,
        excerpt: None,
        content: None,
        cover_image: None,
        tags: None,
        status: Some(PublicationStatus::Published),
    };
    let republished = BlogPostRepository::update(changes, &db).await.unwrap();
    assert_eq!(republished.published_at, Some(first_published_at));

    let (found, found_author) = BlogPostRepository::find_published_by_slug("hello-world", &db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, post.id);
    assert_eq!(found_author.unwrap().email, "author@example.com");
}

#[tokio::test]
async fn posts_filter_by_tag_and_author() {
    let db = setup_db().await;
    let author = insert_user(&db, "writer@example.com", UserRole::Editor).await;
    for (title, tags) in [("Rust tips", &["rust", "tips"][..]), ("Go tips", &["go"][..])] {
        BlogPostRepository::create(
            new_post(title, PublicationStatus::Published, tags)
                .into_active_model(Some(author.id))
                .unwrap(),
            &db,
        )
        .await
        .unwrap();
    }

    let params = BlogPostPageParams {
        tag: Some("rust".into()),
        author_id: Some(author.id),
        ..Default::default()
    };
    let result = BlogPostRepository::page(&params, &db).await.unwrap();
    assert_eq!(result.page.total, 1);
    assert_eq!(result.page.records[0].slug, "rust-tips");
    assert_eq!(result.stats.published, 2);

    let published = BlogPostRepository::find_published(&db).await.unwrap();
    assert_eq!(published.len(), 2);
}
