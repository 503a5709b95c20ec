use domain::DomainError;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

/// 楽観的ロックのバージョンチェック
///
/// 読み込み時点のバージョン（`expected`）と保存済みのバージョン（`actual`）が
/// 異なる場合は、他の変更が先に保存されている。
pub fn check_version(expected: u64, actual: u64) -> Result<(), DomainError> {
    if expected != actual {
        warn!(
            "バージョン不一致: expected={}, actual={}",
            expected, actual
        );
        return Err(DomainError::ConcurrentModification { expected, actual });
    }
    Ok(())
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, DomainError> {
    lock.read().map_err(poisoned)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, DomainError> {
    lock.write().map_err(poisoned)
}

fn poisoned<G>(error: PoisonError<G>) -> DomainError {
    DomainError::Storage(format!("storage lock poisoned: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_versions() {
        assert!(check_version(0, 0).is_ok());
        assert!(check_version(3, 3).is_ok());
    }

    #[test]
    fn test_version_conflict() {
        assert_eq!(
            check_version(1, 2),
            Err(DomainError::ConcurrentModification {
                expected: 1,
                actual: 2
            })
        );
    }
}
