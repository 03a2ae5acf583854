use crate::idens;
use async_trait::async_trait;
use folio_error::{init::InitContextError, FolioError, FolioResult};
use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement, TableDropStatement},
    ActiveModelTrait, DatabaseBackend, DatabaseTransaction, DbErr, EntityTrait,
};
use std::{any::Any, collections::HashMap};

/// One table of the schema: how to create it, index it, drop it and seed it.
#[async_trait]
pub trait FolioInitializer: Send + Sync {
    fn order(&self) -> i32;

    fn name(&self) -> &str;

    /// Tables with an `updated_at` column get a refresh trigger.
    fn has_update_col(&self) -> bool;

    fn to_create_table_stmt(&self, backend: DatabaseBackend) -> TableCreateStatement;

    fn to_drop_table_stmt(&self, backend: DatabaseBackend) -> TableDropStatement;

    fn to_create_indexes_stmt(&self, backend: DatabaseBackend)
        -> Option<Vec<IndexCreateStatement>>;

    async fn seeding_data(
        &self,
        transaction: &DatabaseTransaction,
        ctx: &mut InitContext,
    ) -> Result<(), DbErr>;
}

/// Trait for types that can be seeded into the database
pub trait SeedableTrait: Send + Sync + 'static {
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>;
    type Entity: EntityTrait;

    fn get_active_model(&self) -> Self::ActiveModel;
}

#[async_trait]
pub trait DataSeederTrait<T: SeedableTrait + Clone> {
    async fn get_seed_data(&self, ctx: &mut InitContext) -> Result<Option<Vec<T>>, DbErr>;
}

/// Combines [`FolioInitializer`] with a data source and inserts the rows it yields.
#[async_trait]
pub trait SeedableInitializerTrait<T: SeedableTrait + Clone>:
    FolioInitializer + DataSeederTrait<T>
{
    async fn seed_data(
        &self,
        transaction: &DatabaseTransaction,
        ctx: &mut InitContext,
    ) -> Result<(), DbErr> {
        if let Some(seed_data) = self.get_seed_data(ctx).await? {
            if seed_data.is_empty() {
                return Ok(());
            }

            let active_models: Vec<T::ActiveModel> = seed_data
                .iter()
                .map(SeedableTrait::get_active_model)
                .collect();

            T::Entity::insert_many(active_models)
                .exec(transaction)
                .await?;

            ctx.set(self.name(), seed_data);
        }
        Ok(())
    }
}

/// Every table, in creation order.
pub fn initializers() -> Vec<Box<dyn FolioInitializer>> {
    let mut initializers: Vec<Box<dyn FolioInitializer>> = vec![
        Box::new(idens::site_config::SiteConfig::Table),
        Box::new(idens::user::User::Table),
        Box::new(idens::service::Service::Table),
        Box::new(idens::portfolio::Portfolio::Table),
        Box::new(idens::technology::Technology::Table),
        Box::new(idens::blog_post::BlogPost::Table),
        Box::new(idens::blog_comment::BlogComment::Table),
        Box::new(idens::testimonial::Testimonial::Table),
    ];

    initializers.sort_by_key(|init| init.order());
    initializers
}

/// Data handed from one initializer to the next during seeding.
pub struct InitContext {
    data: HashMap<String, Vec<Box<dyn Any + Send + Sync>>>,
}

impl InitContext {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn set<T: 'static + Send + Sync>(&mut self, key: &str, values: Vec<T>) {
        let boxed_values: Vec<Box<dyn Any + Send + Sync>> = values
            .into_iter()
            .map(|v| Box::new(v) as Box<dyn Any + Send + Sync>)
            .collect();
        self.data.insert(key.into(), boxed_values);
    }

    /// Fails when the key is unknown or any stored value is not a `T`.
    pub fn get<T: 'static>(&self, key: &str) -> FolioResult<Vec<&T>> {
        let values = self.data.get(key).ok_or(FolioError::InitContextError(
            InitContextError::KeyNotFound(key.into()),
        ))?;

        values
            .iter()
            .map(|value| {
                value.downcast_ref::<T>().ok_or(FolioError::InitContextError(
                    InitContextError::TypeMismatch(key.into()),
                ))
            })
            .collect()
    }
}

impl Default for InitContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trips_typed_values() {
        let mut ctx = InitContext::new();
        ctx.set("numbers", vec![1_i32, 2, 3]);
        let values = ctx.get::<i32>("numbers").unwrap();
        assert_eq!(values, vec![&1, &2, &3]);
        assert!(ctx.get::<String>("numbers").is_err());
        assert!(ctx.get::<i32>("missing").is_err());
    }

    #[test]
    fn initializers_are_ordered_parent_first() {
        let names: Vec<String> = initializers()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        let pos = |n: &str| names.iter().position(|x| x == n).unwrap();
        assert_eq!(names.len(), 8);
        assert!(pos("user") < pos("blog_post"));
        assert!(pos("blog_post") < pos("blog_comment"));
    }
}
