pub mod blog_comment;
pub mod blog_post;
pub mod portfolio;
pub mod service;
pub mod site_config;
pub mod technology;
pub mod testimonial;
pub mod user;

const INIT_SYSTEM_ORDER: i32 = 0;
const INIT_USER_ORDER: i32 = INIT_SYSTEM_ORDER + 1;

const INIT_CONTENT_ORDER: i32 = 100;
const INIT_SERVICE_ORDER: i32 = INIT_CONTENT_ORDER + 1;
const INIT_PORTFOLIO_ORDER: i32 = INIT_SERVICE_ORDER + 1;
const INIT_TECHNOLOGY_ORDER: i32 = INIT_PORTFOLIO_ORDER + 1;
const INIT_BLOG_POST_ORDER: i32 = INIT_TECHNOLOGY_ORDER + 1;
const INIT_BLOG_COMMENT_ORDER: i32 = INIT_BLOG_POST_ORDER + 1;
const INIT_TESTIMONIAL_ORDER: i32 = INIT_BLOG_COMMENT_ORDER + 1;
