//! # Application State
//!
//! Immutable after startup and shared across requests behind an `Arc`.

use cafe_core::page::PageContext;
use cafe_core::{Catalog, Profile, SiteConfig};
use std::sync::Arc;

use crate::assets::SiteAssets;

pub struct AppState {
    pub config: SiteConfig,
    pub profile: Profile,
    pub catalog: Catalog,
    pub assets: SiteAssets,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: SiteConfig, catalog: Catalog, assets: SiteAssets) -> SharedState {
        Arc::new(Self {
            config,
            profile: Profile::default(),
            catalog,
            assets,
        })
    }

    /// Built-in catalog with embedded assets only
    #[cfg(test)]
    pub fn for_tests() -> SharedState {
        Self::new(SiteConfig::default(), Catalog::builtin(), SiteAssets::default())
    }

    pub fn page_context(&self) -> PageContext<'_> {
        PageContext {
            config: &self.config,
            profile: &self.profile,
            catalog: &self.catalog,
            assets: &self.assets,
        }
    }
}
