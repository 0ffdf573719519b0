use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One lock per package id, taken by cache fetches and snapshot creation so
/// a snapshot never interleaves with a fetch of the same package.
#[derive(Clone, Default)]
pub struct PackageLocks {
    // Never evicted; bounded by the number of packages.
    slots: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl PackageLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, package_id: i64) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(package_id).or_default().clone()
    }

    pub async fn acquire(&self, package_id: i64) -> OwnedMutexGuard<()> {
        self.slot(package_id).lock_owned().await
    }

    /// For blocking workers; must not be called from async code.
    pub fn blocking_acquire(&self, package_id: i64) -> OwnedMutexGuard<()> {
        self.slot(package_id).blocking_lock_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn same_package_is_exclusive() {
        let locks = PackageLocks::new();
        let guard = locks.acquire(1).await;
        assert!(locks.slot(1).try_lock().is_err());
        assert!(locks.slot(2).try_lock().is_ok());
        drop(guard);
        assert!(locks.slot(1).try_lock().is_ok());
    }
}
