//! Smoke tests for the integration test harness that need no database

mod common;

use common::TestConfig;

#[tokio::test]
async fn test_config_loading() {
    let config = TestConfig::from_env();
    assert!(!config.database_url.is_empty());
}

#[test]
fn test_random_names_are_unique() {
    let first = common::random_name("owner");
    let second = common::random_name("owner");
    assert!(first.starts_with("owner-"));
    assert_ne!(first, second);
}

#[test]
fn test_assert_same_elements_ignores_order() {
    common::assert_same_elements(&[1, 2, 3], &[3, 1, 2]);
}
