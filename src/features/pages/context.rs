use serde::Serialize;

use crate::core::config::SiteConfig;
use crate::features::articles::models::Article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarLink {
    pub name: String,
    pub url: String,
}

impl SidebarLink {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteSettings {
    pub title: String,
    pub slogan: String,
}

/// Values every page is rendered with: the sidebar and the site settings
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub sidebar: Vec<SidebarLink>,
    pub settings: SiteSettings,
}

impl SiteContext {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            sidebar: vec![
                SidebarLink::new("Home", "/"),
                SidebarLink::new("About Me", "/a/about"),
                SidebarLink::new("Articles about cats", "/c/cats"),
            ],
            settings: SiteSettings {
                title: config.title.clone(),
                slogan: config.slogan.clone(),
            },
        }
    }

    /// Merge the shared values with page-specific ones
    pub fn with<T: Serialize>(&self, page: T) -> PageContext<'_, T> {
        PageContext { site: self, page }
    }
}

#[derive(Serialize)]
pub struct PageContext<'a, T: Serialize> {
    #[serde(flatten)]
    site: &'a SiteContext,
    #[serde(flatten)]
    page: T,
}

/// An article as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub name: String,
    pub url: String,
    pub title: String,
    pub content: String,
    pub listed: bool,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            name: article.name.clone(),
            url: format!("/a/{}", article.name),
            title: article.title.clone(),
            content: article.content.clone(),
            listed: article.is_listed(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleListPage {
    pub heading: Option<String>,
    pub articles: Vec<ArticleView>,
}

#[derive(Debug, Serialize)]
pub struct ArticlePage {
    pub article: ArticleView,
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteContext {
        SiteContext::from_config(&SiteConfig {
            title: "PantryCMS".to_string(),
            slogan: "JS-Free Content Management System".to_string(),
        })
    }

    #[test]
    fn test_sidebar_links() {
        let site = site();
        let urls: Vec<&str> = site.sidebar.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/a/about", "/c/cats"]);
    }

    #[test]
    fn test_page_context_is_flat() {
        let site = site();
        let value = serde_json::to_value(site.with(NotFoundPage {
            message: "gone".to_string(),
        }))
        .unwrap();

        assert_eq!(value["settings"]["title"], "PantryCMS");
        assert_eq!(value["sidebar"][1]["name"], "About Me");
        assert_eq!(value["message"], "gone");
    }
}
