//! Maintenance-mode access decision.
//!
//! A single function decides whether a request may reach the public site. The
//! edge middleware, the `SiteAccess` extractor and the status endpoints all call
//! into it, so the rules live here only:
//!
//! 1. exempt path prefixes always pass;
//! 2. maintenance off: everyone passes;
//! 3. maintenance on: only active admins pass, everyone else is redirected;
//! 4. any lookup failure fails open.

use crate::{
    domain::prelude::{MaintenanceBanner, Session},
    entities::prelude::UserModel,
    settings::{Maintenance, Settings},
};
use async_trait::async_trait;
use folio_error::FolioResult;

/// Data the decision needs: the persisted flag and the local user table.
#[async_trait]
pub trait MaintenanceSource: Send + Sync {
    /// Current value of the singleton config's maintenance flag.
    async fn maintenance_mode(&self) -> FolioResult<bool>;

    async fn find_user_by_email(&self, email: &str) -> FolioResult<Option<UserModel>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowReason {
    ExemptPath,
    MaintenanceOff,
    Admin,
    FailOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow(AllowReason),
    /// Target path of the maintenance page.
    Redirect(String),
}

impl AccessDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow(_))
    }
}

/// Gate configuration: where to redirect and which prefixes bypass the check.
#[derive(Debug, Clone)]
pub struct MaintenancePolicy {
    page_path: String,
    exempt_prefixes: Vec<String>,
}

impl MaintenancePolicy {
    pub fn new(page_path: impl Into<String>, exempt_prefixes: Vec<String>) -> Self {
        Self {
            page_path: page_path.into(),
            exempt_prefixes,
        }
    }

    #[inline]
    pub fn page_path(&self) -> &str {
        &self.page_path
    }

    /// Segment-wise prefix match: `/admin` covers `/admin` and `/admin/x`, not `/adminx`.
    ///
    /// The maintenance page itself is always exempt.
    pub fn is_exempt(&self, path: &str) -> bool {
        covers(&self.page_path, path)
            || self
                .exempt_prefixes
                .iter()
                .any(|prefix| covers(prefix, path))
    }
}

fn covers(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// API scopes that stay reachable during maintenance, relative to the router prefix.
const API_EXEMPT_SCOPES: [&str; 3] = ["/auth", "/admin", "/maintenance"];

impl From<&Maintenance> for MaintenancePolicy {
    fn from(settings: &Maintenance) -> Self {
        Self::new(settings.page_path.clone(), settings.exempt_prefixes.clone())
    }
}

/// Configured prefixes plus the `auth`, `admin` and `maintenance` scopes under `web.router_prefix`.
impl From<&Settings> for MaintenancePolicy {
    fn from(settings: &Settings) -> Self {
        let mut policy = Self::from(&settings.maintenance);
        let api = settings.web.router_prefix.trim_end_matches('/');
        policy
            .exempt_prefixes
            .extend(API_EXEMPT_SCOPES.iter().map(|scope| format!("{api}{scope}")));
        policy
    }
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        (&Settings::default()).into()
    }
}

/// Decide whether the request for `path` may proceed.
pub async fn decide_access(
    policy: &MaintenancePolicy,
    path: &str,
    session: Option<&Session>,
    source: &dyn MaintenanceSource,
) -> AccessDecision {
    if policy.is_exempt(path) {
        return AccessDecision::Allow(AllowReason::ExemptPath);
    }

    let decision = decide_for_caller(policy, session, source).await;
    if let AccessDecision::Redirect(to) = &decision {
        tracing::debug!(path, redirect = %to, "Maintenance gate redirecting request");
    }
    decision
}

/// Same as [`decide_access`] without the exempt-path shortcut.
pub async fn decide_for_caller(
    policy: &MaintenancePolicy,
    session: Option<&Session>,
    source: &dyn MaintenanceSource,
) -> AccessDecision {
    match source.maintenance_mode().await {
        Ok(false) => AccessDecision::Allow(AllowReason::MaintenanceOff),
        Ok(true) => check_admin(policy, session, source).await,
        Err(e) => {
            tracing::warn!("Maintenance flag lookup failed, allowing request: {}", e);
            AccessDecision::Allow(AllowReason::FailOpen)
        }
    }
}

/// Banner state for admin clients. Lookup failures hide the banner.
pub async fn banner_state(
    policy: &MaintenancePolicy,
    session: Option<&Session>,
    source: &dyn MaintenanceSource,
) -> MaintenanceBanner {
    match source.maintenance_mode().await {
        Ok(true) => MaintenanceBanner {
            maintenance_mode: true,
            show_banner: check_admin(policy, session, source).await
                == AccessDecision::Allow(AllowReason::Admin),
        },
        Ok(false) => MaintenanceBanner {
            maintenance_mode: false,
            show_banner: false,
        },
        Err(e) => {
            tracing::warn!("Maintenance flag lookup failed for banner: {}", e);
            MaintenanceBanner {
                maintenance_mode: false,
                show_banner: false,
            }
        }
    }
}

async fn check_admin(
    policy: &MaintenancePolicy,
    session: Option<&Session>,
    source: &dyn MaintenanceSource,
) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::Redirect(policy.page_path.clone());
    };

    match source.find_user_by_email(&session.email).await {
        Ok(Some(user)) if user.is_active_admin() => AccessDecision::Allow(AllowReason::Admin),
        Ok(_) => AccessDecision::Redirect(policy.page_path.clone()),
        Err(e) => {
            tracing::warn!(
                email = %session.email,
                "User lookup failed during maintenance check, allowing request: {}",
                e
            );
            AccessDecision::Allow(AllowReason::FailOpen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::common::UserRole;
    use folio_error::FolioError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        flag: Result<bool, ()>,
        user: Result<Option<UserModel>, ()>,
        flag_reads: AtomicUsize,
    }

    impl MockSource {
        fn new(flag: Result<bool, ()>, user: Result<Option<UserModel>, ()>) -> Self {
            Self {
                flag,
                user,
                flag_reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MaintenanceSource for MockSource {
        async fn maintenance_mode(&self) -> FolioResult<bool> {
            self.flag_reads.fetch_add(1, Ordering::SeqCst);
            self.flag
                .map_err(|_| FolioError::Msg("database is locked".into()))
        }

        async fn find_user_by_email(&self, _email: &str) -> FolioResult<Option<UserModel>> {
            self.user
                .clone()
                .map_err(|_| FolioError::Msg("database is locked".into()))
        }
    }

    fn user(role: UserRole, is_active: bool) -> UserModel {
        UserModel {
            id: 1,
            email: "someone@example.com".into(),
            name: "Someone".into(),
            password: String::new(),
            role,
            is_active,
            last_login_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn session() -> Session {
        Session {
            user_id: Some(1),
            email: "someone@example.com".into(),
        }
    }

    fn redirect() -> AccessDecision {
        AccessDecision::Redirect("/maintenance".into())
    }

    #[tokio::test]
    async fn exempt_paths_skip_the_flag_entirely() {
        let policy = MaintenancePolicy::default();
        let source = MockSource::new(Ok(true), Ok(None));
        for path in [
            "/maintenance",
            "/api/auth/login",
            "/admin/settings",
            "/api/admin/service/page",
            "/api/maintenance/status",
            "/static/app.css",
            "/favicon.ico",
            "/health",
        ] {
            assert_eq!(
                decide_access(&policy, path, None, &source).await,
                AccessDecision::Allow(AllowReason::ExemptPath),
                "{path}"
            );
        }
        assert_eq!(source.flag_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn prefix_match_is_segment_aware() {
        let policy = MaintenancePolicy::default();
        assert!(policy.is_exempt("/admin"));
        assert!(!policy.is_exempt("/adminx"));
        assert!(!policy.is_exempt("/healthz"));
        assert!(!policy.is_exempt("/"));

        let source = MockSource::new(Ok(true), Ok(None));
        assert_eq!(decide_access(&policy, "/adminx", None, &source).await, redirect());
    }

    #[tokio::test]
    async fn flag_off_allows_everyone() {
        let policy = MaintenancePolicy::default();
        let source = MockSource::new(Ok(false), Ok(None));
        assert_eq!(
            decide_access(&policy, "/blog", None, &source).await,
            AccessDecision::Allow(AllowReason::MaintenanceOff)
        );
    }

    #[tokio::test]
    async fn flag_on_redirects_anonymous_callers() {
        let policy = MaintenancePolicy::default();
        let source = MockSource::new(Ok(true), Ok(None));
        assert_eq!(decide_access(&policy, "/", None, &source).await, redirect());
    }

    #[tokio::test]
    async fn flag_on_allows_active_admin_only() {
        let policy = MaintenancePolicy::default();
        let s = session();

        let admin = MockSource::new(Ok(true), Ok(Some(user(UserRole::Admin, true))));
        assert_eq!(
            decide_access(&policy, "/", Some(&s), &admin).await,
            AccessDecision::Allow(AllowReason::Admin)
        );

        let inactive = MockSource::new(Ok(true), Ok(Some(user(UserRole::Admin, false))));
        assert_eq!(decide_access(&policy, "/", Some(&s), &inactive).await, redirect());

        let editor = MockSource::new(Ok(true), Ok(Some(user(UserRole::Editor, true))));
        assert_eq!(decide_access(&policy, "/", Some(&s), &editor).await, redirect());

        let unknown = MockSource::new(Ok(true), Ok(None));
        assert_eq!(decide_access(&policy, "/", Some(&s), &unknown).await, redirect());
    }

    #[tokio::test]
    async fn lookup_failures_fail_open() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let policy = MaintenancePolicy::default();

        let broken_config = MockSource::new(Err(()), Ok(None));
        assert_eq!(
            decide_access(&policy, "/", None, &broken_config).await,
            AccessDecision::Allow(AllowReason::FailOpen)
        );

        let broken_users = MockSource::new(Ok(true), Err(()));
        assert_eq!(
            decide_access(&policy, "/", Some(&session()), &broken_users).await,
            AccessDecision::Allow(AllowReason::FailOpen)
        );
    }

    #[tokio::test]
    async fn banner_only_for_admins_during_maintenance() {
        let policy = MaintenancePolicy::default();
        let s = session();

        let admin = MockSource::new(Ok(true), Ok(Some(user(UserRole::Admin, true))));
        let banner = banner_state(&policy, Some(&s), &admin).await;
        assert!(banner.maintenance_mode && banner.show_banner);

        let visitor = MockSource::new(Ok(true), Ok(None));
        let banner = banner_state(&policy, None, &visitor).await;
        assert!(banner.maintenance_mode && !banner.show_banner);

        let off = MockSource::new(Ok(false), Ok(Some(user(UserRole::Admin, true))));
        let banner = banner_state(&policy, Some(&s), &off).await;
        assert!(!banner.maintenance_mode && !banner.show_banner);

        let broken = MockSource::new(Err(()), Ok(None));
        let banner = banner_state(&policy, Some(&s), &broken).await;
        assert!(!banner.maintenance_mode && !banner.show_banner);
    }

    #[tokio::test]
    async fn custom_page_path_is_used_for_redirects() {
        let policy = MaintenancePolicy::from(&Maintenance {
            page_path: "/down".into(),
            ..Default::default()
        });
        let source = MockSource::new(Ok(true), Ok(None));
        assert_eq!(
            decide_access(&policy, "/about", None, &source).await,
            AccessDecision::Redirect("/down".into())
        );
        assert!(decide_access(&policy, "/down", None, &source)
            .await
            .is_allowed());
    }

    #[tokio::test]
    async fn maintenance_page_is_exempt_without_being_listed() {
        let policy = MaintenancePolicy::new("/down", Vec::new());
        let source = MockSource::new(Ok(true), Ok(None));
        for path in ["/down", "/down/", "/down?from=/blog"] {
            assert_eq!(
                decide_access(&policy, path, None, &source).await,
                AccessDecision::Allow(AllowReason::ExemptPath),
                "{path}"
            );
        }
        assert!(!policy.is_exempt("/downtime"));
        assert_eq!(source.flag_reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn api_scopes_follow_the_router_prefix() {
        let settings = Settings::from(crate::settings::Inner {
            web: crate::settings::Web {
                router_prefix: "/v1/".into(),
                ..Default::default()
            },
            ..Default::default()
        });
        let policy = MaintenancePolicy::from(&settings);
        assert!(policy.is_exempt("/v1/auth/login"));
        assert!(policy.is_exempt("/v1/admin/service/page"));
        assert!(policy.is_exempt("/v1/maintenance/status"));
        assert!(!policy.is_exempt("/v1/public/services"));
        assert!(!policy.is_exempt("/api/auth/login"));
        assert!(policy.is_exempt("/maintenance"));
    }
}
