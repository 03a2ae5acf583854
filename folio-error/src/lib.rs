pub mod init;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use config::ConfigError;
use init::InitContextError;
use sea_orm::{DbErr, TransactionError};
use serde_json::Error as SerdeJsonError;
use std::{error::Error as StdError, io::Error as IoError};
use storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;
use web::WebError;

pub type FolioResult<T, E = FolioError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum FolioError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    JoinError(#[from] JoinError),
    #[error("{0}")]
    StdError(#[from] Box<dyn StdError + Send + Sync>),
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    InitContextError(#[from] InitContextError),
    #[error("{0}")]
    WebError(#[from] WebError),
    #[error("Identity error: {0}")]
    IdentityError(String),
    #[error("Mail error: {0}")]
    MailError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<String> for FolioError {
    #[inline]
    fn from(e: String) -> Self {
        FolioError::Msg(e)
    }
}

impl From<&str> for FolioError {
    #[inline]
    fn from(e: &str) -> Self {
        FolioError::Msg(e.to_string())
    }
}

impl From<DbErr> for FolioError {
    #[inline]
    fn from(e: DbErr) -> Self {
        FolioError::StorageError(StorageError::from(e))
    }
}

impl From<TransactionError<FolioError>> for FolioError {
    #[inline]
    fn from(e: TransactionError<FolioError>) -> Self {
        match e {
            TransactionError::Connection(db) => db.into(),
            TransactionError::Transaction(inner) => inner,
        }
    }
}
