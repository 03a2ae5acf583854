use darling::{FromAttributes, FromMeta};
use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Result};

/// Options shared by `#[seedable(meta(..))]` and `#[unseedable(meta(..))]`.
#[derive(FromMeta, Clone, Debug)]
struct TableMeta {
    /// Table name override; defaults to the snake-cased enum name.
    name: Option<String>,
    #[darling(default)]
    order: Option<syn::Path>,
    create_table: syn::Path,
    #[darling(default)]
    create_indexes: Option<syn::Path>,
}

#[derive(FromMeta, Clone, Debug)]
struct SeedableMeta {
    #[darling(flatten)]
    table: TableMeta,
    model: syn::Path,
    #[darling(default)]
    seed_data: Option<syn::Path>,
}

#[derive(FromMeta, Clone, Debug)]
struct UnseedableMeta {
    #[darling(flatten)]
    table: TableMeta,
}

#[derive(FromAttributes, Debug)]
#[darling(attributes(seedable))]
struct SeedableOpts {
    meta: SeedableMeta,
}

#[derive(FromAttributes, Debug)]
#[darling(attributes(unseedable))]
struct UnseedableOpts {
    meta: UnseedableMeta,
}

/// Everything needed to emit the `FolioInitializer` impl for one iden enum.
struct InitializerParts {
    ident: syn::Ident,
    name: String,
    order: TokenStream,
    has_update_col: bool,
    create_table_fn: syn::Path,
    create_indexes: TokenStream,
}

impl InitializerParts {
    fn new(input: &DeriveInput, table: &TableMeta) -> Result<Self> {
        let Data::Enum(enum_data) = &input.data else {
            return Err(Error::new_spanned(
                input,
                "initializer derives only support iden enums",
            ));
        };

        if !enum_data.variants.iter().any(|v| v.ident == "Table") {
            return Err(Error::new_spanned(
                &input.ident,
                "iden enum must declare a `Table` variant",
            ));
        }

        let name = table
            .name
            .clone()
            .unwrap_or_else(|| input.ident.to_string().to_snake_case());

        let order = table
            .order
            .as_ref()
            .map(|p| quote!(#p))
            .unwrap_or_else(|| quote!(0));

        let create_indexes = match &table.create_indexes {
            Some(create_fn) => quote!(#create_fn(backend)),
            None => quote!(None),
        };

        Ok(Self {
            ident: input.ident.clone(),
            name,
            order,
            has_update_col: enum_data.variants.iter().any(|v| v.ident == "UpdatedAt"),
            create_table_fn: table.create_table.clone(),
            create_indexes,
        })
    }

    fn expand(&self, seeding_body: TokenStream) -> TokenStream {
        let Self {
            ident,
            name,
            order,
            has_update_col,
            create_table_fn,
            create_indexes,
        } = self;

        quote! {
            #[async_trait::async_trait]
            impl FolioInitializer for #ident {
                fn order(&self) -> i32 {
                    #order
                }

                fn name(&self) -> &str {
                    #name
                }

                fn has_update_col(&self) -> bool {
                    #has_update_col
                }

                fn to_create_table_stmt(
                    &self,
                    backend: sea_orm::DatabaseBackend,
                ) -> sea_orm::sea_query::TableCreateStatement {
                    #create_table_fn(backend)
                }

                fn to_drop_table_stmt(
                    &self,
                    _: sea_orm::DatabaseBackend,
                ) -> sea_orm::sea_query::TableDropStatement {
                    use sea_orm_migration::prelude::*;
                    Table::drop().table(Self::Table).if_exists().to_owned()
                }

                #[allow(unused_variables)]
                fn to_create_indexes_stmt(
                    &self,
                    backend: sea_orm::DatabaseBackend,
                ) -> Option<Vec<sea_orm::sea_query::IndexCreateStatement>> {
                    #create_indexes
                }

                #[allow(unused_variables)]
                async fn seeding_data(
                    &self,
                    transaction: &sea_orm::DatabaseTransaction,
                    ctx: &mut InitContext,
                ) -> Result<(), sea_orm::DbErr> {
                    #seeding_body
                }
            }
        }
    }
}

pub(crate) fn expand_derive_seedable_initializer(input: DeriveInput) -> Result<TokenStream> {
    let opts = SeedableOpts::from_attributes(&input.attrs)
        .map_err(|e| Error::new_spanned(&input, e.to_string()))?;

    let parts = InitializerParts::new(&input, &opts.meta.table)?;
    let model = &opts.meta.model;
    let ident = &input.ident;

    let seed_data = match &opts.meta.seed_data {
        Some(seed_fn) => quote!(#seed_fn(ctx).await),
        None => quote!(Ok(None)),
    };

    let initializer = parts.expand(quote!(self.seed_data(transaction, ctx).await));

    Ok(quote! {
        impl SeedableInitializerTrait<#model> for #ident
        where
            Self: DataSeederTrait<#model>,
            #model: Clone + SeedableTrait,
        {}

        #[async_trait::async_trait]
        impl DataSeederTrait<#model> for #ident {
            async fn get_seed_data(
                &self,
                ctx: &mut InitContext,
            ) -> Result<Option<Vec<#model>>, sea_orm::DbErr> {
                #seed_data
            }
        }

        #initializer
    })
}

pub(crate) fn expand_derive_unseedable_initializer(input: DeriveInput) -> Result<TokenStream> {
    let opts = UnseedableOpts::from_attributes(&input.attrs)
        .map_err(|e| Error::new_spanned(&input, e.to_string()))?;

    let parts = InitializerParts::new(&input, &opts.meta.table)?;
    Ok(parts.expand(quote!(Ok(()))))
}
