//! # Static Assets
//!
//! The stylesheet is embedded in the binary. Photos and the résumé live in
//! the configured static directory, which is indexed once at startup and
//! served from the site root. A file on disk shadows an embedded one with the
//! same path.

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use cafe_core::page::AssetProbe;
use rust_embed::RustEmbed;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::state::SharedState;

/// Embedded site assets
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Embedded assets plus the index of the on-disk static directory
#[derive(Debug, Default)]
pub struct SiteAssets {
    static_dir: PathBuf,
    /// Site-relative paths without the leading `/`
    on_disk: BTreeSet<String>,
}

impl SiteAssets {
    /// Index every regular file below `static_dir`. A missing directory
    /// leaves only the embedded assets.
    pub async fn scan(static_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let static_dir = static_dir.into();
        if !tokio::fs::try_exists(&static_dir).await.unwrap_or(false) {
            tracing::info!(dir = %static_dir.display(), "No static directory, serving embedded assets only");
            return Ok(Self {
                static_dir,
                ..Default::default()
            });
        }

        let mut on_disk = BTreeSet::new();
        let mut pending = vec![static_dir.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .with_context(|| format!("Failed to read static directory: {:?}", dir))?;
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    match site_path(&static_dir, &path) {
                        Some(site) => {
                            on_disk.insert(site);
                        }
                        None => tracing::warn!(path = %path.display(), "Skipping asset with a non UTF-8 name"),
                    }
                }
            }
        }

        tracing::info!(dir = %static_dir.display(), files = on_disk.len(), "Static directory indexed");
        Ok(Self {
            static_dir,
            on_disk,
        })
    }

    fn on_disk(&self, path: &str) -> bool {
        self.on_disk.contains(path.trim_start_matches('/'))
    }

    /// Every servable path, embedded and on disk
    pub fn paths(&self) -> BTreeSet<String> {
        Assets::iter()
            .map(|p| p.into_owned())
            .chain(self.on_disk.iter().cloned())
            .collect()
    }

    /// Contents of an asset, `None` when it is neither on disk nor embedded
    async fn read(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        if self.on_disk(path) {
            let full = self.static_dir.join(path);
            let data = tokio::fs::read(&full)
                .await
                .with_context(|| format!("Failed to read asset: {:?}", full))?;
            return Ok(Some(data));
        }
        Ok(Assets::get(path).map(|file| file.data.into_owned()))
    }
}

impl AssetProbe for SiteAssets {
    fn has_asset(&self, path: &str) -> bool {
        self.on_disk(path) || Assets::get(path.trim_start_matches('/')).is_some()
    }
}

/// `dir/cafe/matcha.jpeg` -> `cafe/matcha.jpeg`
fn site_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

/// Only indexed or embedded paths are read, so request paths never reach
/// the filesystem unchecked.
pub async fn serve_static(State(state): State<SharedState>, uri: Uri) -> Result<Response, AppError> {
    let path = uri.path().trim_start_matches('/');

    match state.assets.read(path).await? {
        Some(data) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                data,
            )
                .into_response())
        }
        None => {
            tracing::debug!(path, "Asset not found");
            Ok((StatusCode::NOT_FOUND, "Not Found").into_response())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::AppState;
    use cafe_core::{Catalog, SiteConfig};

    /// Fresh static directory under the system temp dir
    pub(crate) async fn static_dir_with(name: &str, files: &[&str]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cafe-static-{}-{}", name, std::process::id()));
        let _ = tokio::fs::remove_dir_all(&dir).await;
        for file in files {
            let path = dir.join(file);
            tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
            tokio::fs::write(&path, format!("bytes of {}", file)).await.unwrap();
        }
        tokio::fs::create_dir_all(&dir).await.unwrap();
        dir
    }

    async fn state_for(dir: &Path) -> SharedState {
        let assets = SiteAssets::scan(dir).await.unwrap();
        AppState::new(SiteConfig::default(), Catalog::builtin(), assets)
    }

    #[tokio::test]
    async fn test_serves_stylesheet() {
        let response = serve_static(State(AppState::for_tests()), Uri::from_static("/style.css"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let response = serve_static(State(AppState::for_tests()), Uri::from_static("/cafe/nope.jpeg"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_files_from_static_dir() {
        let dir = static_dir_with("serve", &["Gouri_CV_US.pdf", "hero.jpeg", "cafe/matcha.jpeg"]).await;
        let state = state_for(&dir).await;

        for (uri, mime) in [
            ("/Gouri_CV_US.pdf", "application/pdf"),
            ("/hero.jpeg", "image/jpeg"),
            ("/cafe/matcha.jpeg", "image/jpeg"),
        ] {
            let response = serve_static(State(state.clone()), Uri::from_static(uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), mime);
        }

        let response = serve_static(State(state.clone()), Uri::from_static("/cafe/chai.jpeg"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_paths_outside_index_are_not_read() {
        let dir = static_dir_with("traversal", &["hero.jpeg"]).await;
        let state = state_for(&dir).await;

        let response = serve_static(State(state), Uri::from_static("/../../etc/passwd"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_probe_covers_disk_and_embedded() {
        let dir = static_dir_with("probe", &["cafe/taro.jpg"]).await;
        let assets = SiteAssets::scan(&dir).await.unwrap();

        assert!(assets.has_asset("/style.css"));
        assert!(assets.has_asset("/cafe/taro.jpg"));
        assert!(!assets.has_asset("/cafe/nope.jpeg"));

        let paths = assets.paths();
        assert!(paths.contains("style.css"));
        assert!(paths.contains("cafe/taro.jpg"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_missing_static_dir_means_embedded_only() {
        let assets = SiteAssets::scan("/definitely/not/a/cafe/dir").await.unwrap();
        assert!(assets.has_asset("/style.css"));
        assert!(!assets.has_asset("/hero.jpeg"));
    }
}
