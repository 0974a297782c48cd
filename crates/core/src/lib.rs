//! # Café Core
//!
//! The "Menu" of the café portfolio - the project catalog, the filter/search
//! engine, and the page that presents them.
//!
//! ## Architecture
//!
//! - `models` - Project records, flavors and categories
//! - `catalog` - The ordered project list and its integrity checks
//! - `filter` - FilterState and the visible-subset derivation
//! - `quick_jump` - Flavor to first-card anchor lookup
//! - `page` - HTML rendering of the single page
//! - `site` - robots.txt and sitemap.xml
//! - `profile` - Contact details and about-section copy
//! - `config` - Layered site configuration
//!
//! ## Usage
//!
//! ```rust
//! use cafe_core::catalog::Catalog;
//! use cafe_core::filter::{apply, FilterState};
//! use cafe_core::models::Category;
//!
//! let catalog = Catalog::builtin();
//! let state = FilterState::new().with_category(Category::Pipelines);
//! let visible = apply(catalog.projects(), &state);
//! assert_eq!(visible.len(), 2);
//! ```

pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;
pub mod page;
pub mod profile;
pub mod quick_jump;
pub mod site;

pub use catalog::{Catalog, CatalogError};
pub use config::{PersistedConfig, SiteConfig};
pub use filter::{FilterState, Selection};
pub use models::{Category, Flavor, Links, ProjectRecord};
pub use profile::Profile;
