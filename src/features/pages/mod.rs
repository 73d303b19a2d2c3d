//! Server-rendered HTML pages over the article and category services.

pub mod context;
pub mod handlers;
pub mod renderer;
pub mod routes;

pub use context::SiteContext;
pub use renderer::{PageError, PageRenderer};
