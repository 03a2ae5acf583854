use serde::Deserialize;
use validator::Validate;

pub use crate::domain::{
    auth::{Claims, LoginRequest, LoginResponse, Session},
    blog_comment::{CommentPageParams, ModerateComment, ModerationStats, NewBlogComment, PublicComment},
    blog_post::{
        BlogPostPageParams, NewBlogPost, PublicBlogPost, PublicBlogPostDetail, UpdateBlogPost,
    },
    common::{
        resolve_slug, search_term, ChangePublicationStatus, PageParams, PageResult, PageWithStats,
        StatusStats, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
    portfolio::{NewPortfolio, PortfolioPageParams, PublicPortfolioQuery, UpdatePortfolio},
    service::{NewService, ServicePageParams, UpdateService},
    site_config::{
        MaintenanceBanner, MaintenanceStatus, NewSiteConfigWithId, PublicSiteConfig,
        ToggleMaintenance, UpdateSiteConfig,
    },
    technology::{NewTechnology, TechnologyPageParams, UpdateTechnology},
    testimonial::{
        ChangeTestimonialPublication, NewTestimonialRequest, PublicTestimonial, ReviewTestimonial,
        SubmitTestimonial, TestimonialForm, TestimonialPageParams, TestimonialStats,
        UpdateTestimonial,
    },
    user::{ChangeUserRole, ChangeUserStatus, NewUser, NewUserHashed, UserInfo, UserPageParams},
};

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PathId {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSlug {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathToken {
    pub token: String,
}
