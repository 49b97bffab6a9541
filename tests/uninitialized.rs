//! Entry points before any logger is installed

use level_dispatch::{facade, is_initialized, LoggerError};

#[test]
fn test_entry_points_require_init() {
    assert!(!is_initialized());
    assert!(matches!(facade::error("early"), Err(LoggerError::NotInitialized)));
    assert!(matches!(
        level_dispatch::warning!("early {}", 1),
        Err(LoggerError::NotInitialized)
    ));
}
