mod article_dto;

pub use article_dto::{ArticleQueryParams, ArticleResponseDto, CreateArticleDto, UpdateArticleDto};
