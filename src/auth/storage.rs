//! Browser `localStorage` access for persisted auth snapshots.
//!
//! Requires a browser environment; without the `hydrate` feature reads find
//! nothing and writes are no-ops so native and SSR builds stay deterministic.
//! Native unit tests swap in a thread-local map instead.

use super::AuthStoreError;

/// Read the raw value stored under `key`.
pub(super) fn read(key: &str) -> Result<Option<String>, AuthStoreError> {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage()? else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|e| AuthStoreError::Storage(format!("{e:?}")))
    }
    #[cfg(all(test, not(feature = "hydrate")))]
    {
        Ok(memory::read(key))
    }
    #[cfg(not(any(test, feature = "hydrate")))]
    {
        let _ = key;
        Ok(None)
    }
}

/// Store `value` under `key`.
pub(super) fn write(key: &str, value: &str) -> Result<(), AuthStoreError> {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage()? else {
            return Ok(());
        };
        storage.set_item(key, value).map_err(|e| AuthStoreError::Storage(format!("{e:?}")))
    }
    #[cfg(all(test, not(feature = "hydrate")))]
    {
        memory::write(key, value);
        Ok(())
    }
    #[cfg(not(any(test, feature = "hydrate")))]
    {
        let _ = (key, value);
        Ok(())
    }
}

/// Delete whatever is stored under `key`.
pub(super) fn remove(key: &str) -> Result<(), AuthStoreError> {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage()? else {
            return Ok(());
        };
        storage.remove_item(key).map_err(|e| AuthStoreError::Storage(format!("{e:?}")))
    }
    #[cfg(all(test, not(feature = "hydrate")))]
    {
        memory::remove(key);
        Ok(())
    }
    #[cfg(not(any(test, feature = "hydrate")))]
    {
        let _ = key;
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<Option<web_sys::Storage>, AuthStoreError> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    window.local_storage().map_err(|e| AuthStoreError::Storage(format!("{e:?}")))
}
