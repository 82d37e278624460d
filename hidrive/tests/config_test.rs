//! Tests for environment based configuration.

use std::time::Duration;

use hidrive::config::{ACCESS_TOKEN_VAR, ENDPOINT_VAR, TIMEOUT_VAR};
use hidrive::{ClientConfig, Error, HiDriveClient};

// Environment variables are process wide, so everything runs in one test.
#[test]
fn test_from_env() {
    std::env::set_var(ENDPOINT_VAR, "http://localhost:9999/2.1");
    std::env::set_var(ACCESS_TOKEN_VAR, "token-from-env");
    std::env::set_var(TIMEOUT_VAR, "30");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.endpoint, "http://localhost:9999/2.1");
    assert_eq!(config.access_token.as_deref(), Some("token-from-env"));
    assert_eq!(config.timeout, Some(Duration::from_secs(30)));

    let client = HiDriveClient::from_config(&config).unwrap();
    assert_eq!(client.endpoint(), "http://localhost:9999/2.1");

    std::env::set_var(TIMEOUT_VAR, "soon");
    assert!(matches!(ClientConfig::from_env(), Err(Error::Config(_))));

    std::env::remove_var(ENDPOINT_VAR);
    std::env::remove_var(ACCESS_TOKEN_VAR);
    std::env::remove_var(TIMEOUT_VAR);
}
