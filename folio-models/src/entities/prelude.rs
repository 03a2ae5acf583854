pub use super::blog_comment::{
    ActiveModel as BlogCommentActiveModel, Column as BlogCommentColumn, Entity as BlogComment,
    Model as BlogCommentModel,
};
pub use super::blog_post::{
    ActiveModel as BlogPostActiveModel, Column as BlogPostColumn, Entity as BlogPost,
    Model as BlogPostModel,
};
pub use super::portfolio::{
    ActiveModel as PortfolioActiveModel, Column as PortfolioColumn, Entity as Portfolio,
    Model as PortfolioModel,
};
pub use super::service::{
    ActiveModel as ServiceActiveModel, Column as ServiceColumn, Entity as Service,
    Model as ServiceModel,
};
pub use super::site_config::{
    ActiveModel as SiteConfigActiveModel, Column as SiteConfigColumn, Entity as SiteConfig,
    Model as SiteConfigModel,
};
pub use super::technology::{
    ActiveModel as TechnologyActiveModel, Column as TechnologyColumn, Entity as Technology,
    Model as TechnologyModel,
};
pub use super::testimonial::{
    ActiveModel as TestimonialActiveModel, Column as TestimonialColumn, Entity as Testimonial,
    Model as TestimonialModel,
};
pub use super::user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
};
pub use super::StringList;
