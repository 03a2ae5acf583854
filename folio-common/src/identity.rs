//! Local session issuer backed by the `user` table.
//!
//! Passwords are bcrypt hashes; sessions are HS256 tokens carrying the user's
//! email. Role and active flag are never read from the token.

use async_trait::async_trait;
use folio_error::{FolioError, FolioResult};
use folio_models::{
    domain::prelude::{
        Claims, LoginResponse, NewUser, PageResult, Session, UserInfo, UserPageParams,
    },
    entities::prelude::UserModel,
    enums::common::UserRole,
    settings::{BootstrapAdmin, Jwt},
    IdentityProvider,
};
use folio_repository::UserRepository;
use folio_utils::{
    hash::{bcrypt_check, bcrypt_hash},
    jwt::{decode_jwt, encode_jwt},
};
use jsonwebtoken::{Algorithm, Validation};
use sea_orm::{DatabaseConnection, IntoActiveModel};
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "invalid email or password";
const DEFAULT_BOOTSTRAP_PASSWORD: &str = "change-me-now";

pub struct JwtIdentityProvider {
    jwt: Jwt,
    db: DatabaseConnection,
}

impl JwtIdentityProvider {
    pub fn new(jwt: Jwt, db: DatabaseConnection) -> Self {
        Self { jwt, db }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.jwt.issuer.as_str()]);
        validation
    }

    /// Creates the configured admin unless a user with that email already exists.
    #[instrument(name = "bootstrap-admin", skip_all, fields(email = %admin.email))]
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdmin) -> FolioResult<()> {
        if !admin.enabled {
            return Ok(());
        }
        if UserRepository::find_by_email(&admin.email, &self.db)
            .await?
            .is_some()
        {
            return Ok(());
        }
        if admin.password == DEFAULT_BOOTSTRAP_PASSWORD {
            warn!("Bootstrap admin uses the default password, change it after first login");
        }
        self.create_user(NewUser {
            email: admin.email.clone(),
            name: admin.name.clone(),
            password: admin.password.clone(),
            role: UserRole::Admin,
            is_active: true,
        })
        .await?;
        info!("Bootstrap admin created");
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    fn session(&self, token: &str) -> FolioResult<Session> {
        let data = decode_jwt::<Claims>(token, self.jwt.secret.as_bytes(), Some(self.validation()))
            .map_err(|e| FolioError::IdentityError(format!("invalid session token: {e}")))?;
        Ok(data.claims.into())
    }

    fn issue(&self, user: &UserModel) -> FolioResult<(String, i64)> {
        let claims = Claims::new(
            self.jwt.issuer.clone(),
            user.id,
            user.email.clone(),
            self.jwt.expire,
        );
        let token = encode_jwt(&claims, self.jwt.secret.as_bytes(), None)
            .map_err(|e| FolioError::IdentityError(format!("failed to sign session: {e}")))?;
        Ok((token, claims.exp))
    }

    #[instrument(name = "login", skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> FolioResult<LoginResponse> {
        let user = UserRepository::find_by_email(email, &self.db)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| FolioError::IdentityError(INVALID_CREDENTIALS.into()))?;

        let (candidate, hash) = (password.to_string(), user.password.clone());
        let matches = tokio::task::spawn_blocking(move || bcrypt_check(&candidate, &hash)).await?;
        if !matches {
            return Err(FolioError::IdentityError(INVALID_CREDENTIALS.into()));
        }

        UserRepository::touch_last_login(user.id, &self.db).await?;
        let (token, expires_at) = self.issue(&user)?;
        info!(user_id = user.id, "User logged in");
        Ok(LoginResponse {
            token,
            expires_at,
            user: user.into(),
        })
    }

    async fn create_user(&self, user: NewUser) -> FolioResult<UserModel> {
        let password = user.password.clone();
        let hash = tokio::task::spawn_blocking(move || bcrypt_hash(&password))
            .await?
            .map_err(|e| FolioError::IdentityError(format!("failed to hash password: {e}")))?;
        let active = user.with_hash(hash).into_active_model();
        Ok(UserRepository::create(active, &self.db).await?)
    }

    async fn list_users(&self, params: &UserPageParams) -> FolioResult<PageResult<UserInfo>> {
        Ok(UserRepository::page(params, &self.db).await?)
    }
}
