use crate::{fetch_page, publication_stats, search_condition};
use chrono::Utc;
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{
        search_term, BlogPostPageParams, PageWithStats, StatusStats, UpdateBlogPost,
    },
    entities::prelude::{
        BlogPost, BlogPostActiveModel, BlogPostColumn, BlogPostModel, User, UserModel,
    },
    enums::common::{EntityType, PublicationStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    Order, QueryFilter, QueryOrder, QueryTrait, Set,
};
use tracing::instrument;

const CONFLICT: &str = "blog post slug";

pub struct BlogPostRepository;

impl BlogPostRepository {
    #[instrument(name = "blog-post-create", skip_all)]
    pub async fn create<C>(post: BlogPostActiveModel, db: &C) -> StorageResult<BlogPostModel>
    where
        C: ConnectionTrait,
    {
        post.insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    #[instrument(name = "blog-post-update", skip_all, fields(id = changes.id))]
    pub async fn update<C>(changes: UpdateBlogPost, db: &C) -> StorageResult<BlogPostModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::require(changes.id, db).await?;
        let mut active = current.clone().into_active_model();
        if let Some(status) = changes.apply(&mut active) {
            set_status(&mut active, &current, status);
        }
        if !active.is_changed() {
            return Ok(current);
        }
        active
            .update(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    pub async fn change_status<C>(
        id: i32,
        status: PublicationStatus,
        db: &C,
    ) -> StorageResult<BlogPostModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::require(id, db).await?;
        let mut active = current.clone().into_active_model();
        set_status(&mut active, &current, status);
        Ok(active.update(db).await?)
    }

    /// Comments go with the post through the foreign key cascade.
    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let res = BlogPost::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(StorageError::EntityNotFound(EntityType::BlogPost.to_string()));
        }
        Ok(())
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<BlogPostModel>>
    where
        C: ConnectionTrait,
    {
        Ok(BlogPost::find_by_id(id).one(db).await?)
    }

    pub async fn page<C>(
        params: &BlogPostPageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<BlogPostModel, StatusStats>>
    where
        C: ConnectionTrait,
    {
        let query = BlogPost::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[
                        BlogPostColumn::Title,
                        BlogPostColumn::Slug,
                        BlogPostColumn::Excerpt,
                    ],
                ))
            })
            .apply_if(params.status, |q, status| {
                q.filter(BlogPostColumn::Status.eq(status))
            })
            .apply_if(params.author_id, |q, author| {
                q.filter(BlogPostColumn::AuthorId.eq(author))
            })
            // Tags are stored as a compact JSON array.
            .apply_if(search_term(&params.tag), |q, tag| {
                q.filter(BlogPostColumn::Tags.contains(format!("\"{tag}\"")))
            })
            .order_by(BlogPostColumn::CreatedAt, Order::Desc)
            .order_by(BlogPostColumn::Id, Order::Desc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: publication_stats::<BlogPost, _>(BlogPostColumn::Status, db).await?,
        })
    }

    /// Published posts, newest first.
    pub async fn find_published<C>(db: &C) -> StorageResult<Vec<BlogPostModel>>
    where
        C: ConnectionTrait,
    {
        Ok(BlogPost::find()
            .filter(BlogPostColumn::Status.eq(PublicationStatus::Published))
            .order_by_desc(BlogPostColumn::PublishedAt)
            .order_by_desc(BlogPostColumn::Id)
            .all(db)
            .await?)
    }

    /// A published post by slug together with its author, if any.
    pub async fn find_published_by_slug<C>(
        slug: &str,
        db: &C,
    ) -> StorageResult<Option<(BlogPostModel, Option<UserModel>)>>
    where
        C: ConnectionTrait,
    {
        Ok(BlogPost::find()
            .filter(BlogPostColumn::Slug.eq(slug))
            .filter(BlogPostColumn::Status.eq(PublicationStatus::Published))
            .find_also_related(User)
            .one(db)
            .await?)
    }

    async fn require<C>(id: i32, db: &C) -> StorageResult<BlogPostModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::BlogPost.to_string()))
    }
}

/// `published_at` is stamped the first time a post becomes public and kept afterwards.
fn set_status(active: &mut BlogPostActiveModel, current: &BlogPostModel, status: PublicationStatus) {
    active.status = Set(status);
    if status.is_public() && current.published_at.is_none() {
        active.published_at = Set(Some(Utc::now()));
    }
}
