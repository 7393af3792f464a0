// SPDX-FileCopyrightText: 2025 sql-copilot contributors
// SPDX-License-Identifier: MIT

use sql_copilot::error::{
    catalog_error, config_error, credentials_error, file_read_error, file_write_error,
    remote_api_error
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("bigquery_credentials.json", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_file_write_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let error = file_write_error("figure.json", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_config_error() {
    let error = config_error("copilot.base_url is required");
    let _msg = error.to_string();
}

#[test]
fn test_credentials_error() {
    let error = credentials_error("Invalid credentials file 'creds.json': expected value");
    let _msg = error.to_string();
}

#[test]
fn test_catalog_error() {
    let error = catalog_error("result has no 'table_name' column");
    let _msg = error.to_string();
}

#[test]
fn test_remote_api_error() {
    let error = remote_api_error("Copilot API error 503: upstream unavailable");
    let _msg = error.to_string();
}

#[test]
fn test_error_types_are_different() {
    let config_err = config_error("test");
    let credentials_err = credentials_error("test");
    let catalog_err = catalog_error("test");
    let remote_err = remote_api_error("test");
    assert!(!config_err.to_string().is_empty());
    assert!(!credentials_err.to_string().is_empty());
    assert!(!catalog_err.to_string().is_empty());
    assert!(!remote_err.to_string().is_empty());
}
