pub mod assets;
pub mod builder;
pub mod config;
pub mod error;
pub mod markdown;
pub mod site;
pub mod template;

// Re-export main types
pub use builder::{BuildReport, Site, SiteBuilder};
pub use config::Config;
pub use error::{BuildError, Result};
pub use site::{NavLink, Page};
pub use template::{AssetTags, IndexTemplate, Layout};
