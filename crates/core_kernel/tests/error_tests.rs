//! Tests for core_kernel error types

use core_kernel::StoreError;

#[test]
fn test_constraint_violations() {
    assert!(StoreError::ForeignKeyViolation("pokemon_owners.owner_id".into()).is_constraint_violation());
    assert!(StoreError::UniqueViolation("pokemon.name".into()).is_constraint_violation());
    assert!(!StoreError::Query("syntax error".into()).is_constraint_violation());
}

#[test]
fn test_connection_error() {
    assert!(StoreError::Connection("refused".into()).is_connection_error());
    assert!(!StoreError::internal("poisoned").is_connection_error());
}

#[test]
fn test_helpers_build_expected_variants() {
    assert!(matches!(StoreError::decode("bad row"), StoreError::Decode(msg) if msg == "bad row"));
    assert!(matches!(StoreError::internal("lock"), StoreError::Internal(msg) if msg == "lock"));
}

#[test]
fn test_store_error_display() {
    let error = StoreError::UniqueViolation("categories holds 'ELECTRIC' more than once".into());
    let display = format!("{}", error);

    assert!(display.starts_with("Unique violation"));
    assert!(display.contains("ELECTRIC"));
}
