use crate::error::{DeleteError, FetchError};
use crate::registry::RegistryApi;
use crate::store::CatalogStore;

/// Proof that the operator explicitly confirmed a destructive action.
/// The orchestrator cannot run without one; only the UI layer mints it,
/// after a prompt or an explicit --yes.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    pub fn operator_acknowledged() -> Self {
        Confirmation(())
    }
}

/// Terminal outcome of a successful deletion
#[derive(Debug)]
pub struct DeleteReceipt {
    pub repository: String,
    pub tag: String,
    pub digest: String,
    /// The post-delete refresh failed; the deletion itself still stands
    pub refresh_error: Option<String>,
}

/// Delete a tagged image in two phases: resolve the tag to its immutable
/// content digest, then delete by digest. A mutable tag name is never a
/// deletion address. On success the catalog store is refreshed exactly
/// once; a failed refresh goes into the receipt and is never rolled back.
///
/// The store itself is never edited in place; only the refresh replaces
/// the snapshot. Freeing disk space additionally requires registry-side
/// garbage collection, which is the operator's move, not ours.
pub async fn delete_tag<A: RegistryApi>(
    store: &CatalogStore<A>,
    repository: &str,
    tag: &str,
    _confirmed: Confirmation,
) -> Result<DeleteReceipt, DeleteError> {
    let manifest = store
        .api()
        .resolve_manifest(repository, tag)
        .await
        .map_err(DeleteError::ResolveFailed)?;

    let digest = manifest.digest.trim().to_string();
    if digest.is_empty() {
        return Err(DeleteError::MissingDigest);
    }

    store
        .api()
        .delete_manifest(repository, &digest)
        .await
        .map_err(DeleteError::DeleteRejected)?;

    // the delete has landed; from here on only the refresh can fail
    let refresh_error = match store.refresh().await {
        Ok(_) | Err(FetchError::Superseded) => None,
        Err(err) => Some(err.to_string()),
    };

    Ok(DeleteReceipt {
        repository: repository.to_string(),
        tag: tag.to_string(),
        digest,
        refresh_error,
    })
}
