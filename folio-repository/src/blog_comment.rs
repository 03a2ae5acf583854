use crate::{fetch_page, search_condition};
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{search_term, CommentPageParams, ModerationStats, PageWithStats},
    entities::prelude::{BlogComment, BlogCommentActiveModel, BlogCommentColumn, BlogCommentModel},
    enums::common::EntityType,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QueryTrait, Set,
};
use tracing::{info, instrument};

pub struct BlogCommentRepository;

impl BlogCommentRepository {
    pub async fn create<C>(
        comment: BlogCommentActiveModel,
        db: &C,
    ) -> StorageResult<BlogCommentModel>
    where
        C: ConnectionTrait,
    {
        Ok(comment.insert(db).await?)
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<BlogCommentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(BlogComment::find_by_id(id).one(db).await?)
    }

    #[instrument(name = "comment-moderate", skip(db))]
    pub async fn moderate<C>(id: i32, is_approved: bool, db: &C) -> StorageResult<BlogCommentModel>
    where
        C: ConnectionTrait,
    {
        let mut active = Self::find_by_id(id, db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::BlogComment.to_string()))?
            .into_active_model();
        active.is_approved = Set(is_approved);
        let comment = active.update(db).await?;
        info!("Comment moderated");
        Ok(comment)
    }

    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let res = BlogComment::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(StorageError::EntityNotFound(
                EntityType::BlogComment.to_string(),
            ));
        }
        Ok(())
    }

    pub async fn page<C>(
        params: &CommentPageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<BlogCommentModel, ModerationStats>>
    where
        C: ConnectionTrait,
    {
        let query = BlogComment::find()
            .apply_if(params.post_id, |q, post_id| {
                q.filter(BlogCommentColumn::PostId.eq(post_id))
            })
            .apply_if(params.approved, |q, approved| {
                q.filter(BlogCommentColumn::IsApproved.eq(approved))
            })
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[
                        BlogCommentColumn::AuthorName,
                        BlogCommentColumn::AuthorEmail,
                        BlogCommentColumn::Content,
                    ],
                ))
            })
            .order_by(BlogCommentColumn::CreatedAt, Order::Desc)
            .order_by(BlogCommentColumn::Id, Order::Desc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: Self::stats(db).await?,
        })
    }

    pub async fn stats<C>(db: &C) -> StorageResult<ModerationStats>
    where
        C: ConnectionTrait,
    {
        let total = BlogComment::find().count(db).await?;
        let approved = BlogComment::find()
            .filter(BlogCommentColumn::IsApproved.eq(true))
            .count(db)
            .await?;
        Ok(ModerationStats {
            total,
            approved,
            pending: total.saturating_sub(approved),
        })
    }

    /// Approved comments of one post, newest first.
    pub async fn find_approved_by_post<C>(
        post_id: i32,
        db: &C,
    ) -> StorageResult<Vec<BlogCommentModel>>
    where
        C: ConnectionTrait,
    {
        Ok(BlogComment::find()
            .filter(BlogCommentColumn::PostId.eq(post_id))
            .filter(BlogCommentColumn::IsApproved.eq(true))
            .order_by_desc(BlogCommentColumn::CreatedAt)
            .order_by_desc(BlogCommentColumn::Id)
            .all(db)
            .await?)
    }
}
