pub mod article;
pub mod comment;
pub mod page;
pub mod user;
