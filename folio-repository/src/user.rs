use crate::{fetch_page, search_condition};
use chrono::Utc;
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{search_term, PageResult, UserInfo, UserPageParams},
    entities::prelude::{User, UserActiveModel, UserColumn, UserModel},
    enums::common::{EntityType, UserRole},
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QueryTrait, Set,
};

pub struct UserRepository;

impl UserRepository {
    pub async fn create<C>(user: UserActiveModel, db: &C) -> StorageResult<UserModel>
    where
        C: ConnectionTrait,
    {
        user.insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, "user email"))
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<UserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(User::find_by_id(id).one(db).await?)
    }

    /// Emails are stored lowercased; lookups are case-insensitive.
    pub async fn find_by_email<C>(email: &str, db: &C) -> StorageResult<Option<UserModel>>
    where
        C: ConnectionTrait,
    {
        Ok(User::find()
            .filter(UserColumn::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await?)
    }

    pub async fn count_active_admins<C>(db: &C) -> StorageResult<u64>
    where
        C: ConnectionTrait,
    {
        Ok(User::find()
            .filter(UserColumn::Role.eq(UserRole::Admin))
            .filter(UserColumn::IsActive.eq(true))
            .count(db)
            .await?)
    }

    pub async fn page<C>(params: &UserPageParams, db: &C) -> StorageResult<PageResult<UserInfo>>
    where
        C: ConnectionTrait,
    {
        let query = User::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(&term, &[UserColumn::Email, UserColumn::Name]))
            })
            .apply_if(params.role, |q, role| q.filter(UserColumn::Role.eq(role)))
            .apply_if(params.is_active, |q, active| {
                q.filter(UserColumn::IsActive.eq(active))
            })
            .order_by(UserColumn::CreatedAt, Order::Desc)
            .order_by(UserColumn::Id, Order::Desc);

        Ok(fetch_page(query, &params.page, db).await?.map(UserInfo::from))
    }

    pub async fn change_status<C>(id: i32, is_active: bool, db: &C) -> StorageResult<UserModel>
    where
        C: ConnectionTrait,
    {
        let mut active = Self::load(id, db).await?;
        active.is_active = Set(is_active);
        Ok(active.update(db).await?)
    }

    pub async fn change_role<C>(id: i32, role: UserRole, db: &C) -> StorageResult<UserModel>
    where
        C: ConnectionTrait,
    {
        let mut active = Self::load(id, db).await?;
        active.role = Set(role);
        Ok(active.update(db).await?)
    }

    pub async fn touch_last_login<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        User::update_many()
            .col_expr(UserColumn::LastLoginAt, Expr::value(Utc::now()))
            .filter(UserColumn::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }

    async fn load<C>(id: i32, db: &C) -> StorageResult<UserActiveModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db)
            .await?
            .map(IntoActiveModel::into_active_model)
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::User.to_string()))
    }
}
