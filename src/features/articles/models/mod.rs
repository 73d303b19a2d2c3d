mod article;

pub use article::{Article, ArticleFields, ArticleUpdate};
