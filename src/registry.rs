use async_trait::async_trait;
use reqwest::Client;

use crate::error::ApiError;
use crate::models::{CatalogResponse, HealthResponse, ManifestRef};

/// Narrow seam over the dashboard API. The catalog store and the deletion
/// workflow only talk to the registry through this trait, so both can be
/// exercised against a scripted double.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// GET /api/repositories — full catalog in one call
    async fn fetch_catalog(&self) -> Result<CatalogResponse, ApiError>;

    /// GET /api/v2/<repo>/manifests/<tag> — resolve a tag to its manifest
    async fn resolve_manifest(&self, repository: &str, tag: &str)
        -> Result<ManifestRef, ApiError>;

    /// DELETE /api/v2/<repo>/manifests/<digest>
    async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), ApiError>;
}

pub struct RegistryClient {
    client: Client,
    base_url: String,
    verbose: bool,
}

impl RegistryClient {
    pub fn new(base_url: &str, verbose: bool) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            verbose,
        }
    }

    /// GET /api/health — reachability probe for the status badge. Any
    /// failure means "offline"; this never blocks the rest of the dashboard.
    pub async fn health(&self) -> bool {
        let url = self.url("/api/health");
        if self.verbose {
            eprintln!("[DEBUG] GET {}", url);
        }
        let resp = match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            _ => return false,
        };
        match resp.json::<HealthResponse>().await {
            Ok(health) => health.status == "healthy",
            Err(_) => false,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, ApiError> {
        let url = self.url("/api/repositories");
        if self.verbose {
            eprintln!("[DEBUG] GET {}", url);
        }
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status("GET repositories", status));
        }

        Ok(resp.json().await?)
    }

    async fn resolve_manifest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<ManifestRef, ApiError> {
        let url = self.url(&format!("/api/v2/{}/manifests/{}", repository, tag));
        if self.verbose {
            eprintln!("[DEBUG] GET {}", url);
        }
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status(
                format!("GET manifest for {}:{}", repository, tag),
                status,
            ));
        }

        Ok(resp.json().await?)
    }

    async fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/v2/{}/manifests/{}", repository, digest));
        if self.verbose {
            eprintln!("[DEBUG] DELETE {}", url);
        }
        let resp = self.client.delete(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::status(
                format!("DELETE manifest {} for {}", digest, repository),
                status,
            ));
        }

        Ok(())
    }
}
