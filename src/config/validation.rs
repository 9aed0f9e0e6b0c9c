//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that base URLs parse
//! - Check that every backend code maps to exactly one policy
//! - Validate value ranges (timeouts > 0, page sizes positive)
//!
//! Returns all validation errors, not just the first.

use std::collections::HashMap;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidUrl { field: String, value: String },
    EmptySuccessCode,
    SuccessCodeIsFailure { code: String, set: &'static str },
    DuplicateCode { code: String, first: &'static str, second: &'static str },
    ZeroTimeout(&'static str),
    InvalidPageSize(i64),
    DefaultPageSizeNotOffered(i64),
    UnknownLogFormat(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUrl { field, value } => {
                write!(f, "{} is not a valid URL: '{}'", field, value)
            }
            ValidationError::EmptySuccessCode => write!(f, "service.success_code is empty"),
            ValidationError::SuccessCodeIsFailure { code, set } => {
                write!(f, "success code '{}' also listed in {}", code, set)
            }
            ValidationError::DuplicateCode { code, first, second } => {
                write!(f, "code '{}' listed in both {} and {}", code, first, second)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "{} must be greater than 0", field),
            ValidationError::InvalidPageSize(size) => {
                write!(f, "page size {} must be greater than 0", size)
            }
            ValidationError::DefaultPageSizeNotOffered(size) => {
                write!(f, "default page size {} is not in page_size_options", size)
            }
            ValidationError::UnknownLogFormat(format) => {
                write!(f, "unknown log format '{}'", format)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn check_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

/// Validate a configuration. Pure: `ClientConfig → Result<(), Vec<ValidationError>>`.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let service = &config.service;

    check_url("service.base_url", &service.base_url, &mut errors);
    for (key, value) in &service.other_base_urls {
        check_url(&format!("service.other_base_urls.{}", key), value, &mut errors);
    }
    if service.http_proxy {
        check_url("service.proxy_origin", &service.proxy_origin, &mut errors);
    }

    if service.success_code.trim().is_empty() {
        errors.push(ValidationError::EmptySuccessCode);
    }

    let sets: [(&'static str, &Vec<String>); 3] = [
        ("service.logout_codes", &service.logout_codes),
        ("service.modal_logout_codes", &service.modal_logout_codes),
        ("service.expired_token_codes", &service.expired_token_codes),
    ];
    let mut seen: HashMap<&str, &'static str> = HashMap::new();
    for (set, codes) in sets {
        for code in codes {
            if code == &service.success_code {
                errors.push(ValidationError::SuccessCodeIsFailure {
                    code: code.clone(),
                    set,
                });
            }
            match seen.get(code.as_str()) {
                Some(first) if *first != set => errors.push(ValidationError::DuplicateCode {
                    code: code.clone(),
                    first: *first,
                    second: set,
                }),
                Some(_) => {}
                None => {
                    seen.insert(code.as_str(), set);
                }
            }
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    let table = &config.table;
    if table.default_page_size <= 0 {
        errors.push(ValidationError::InvalidPageSize(table.default_page_size));
    }
    for size in &table.page_size_options {
        if *size <= 0 {
            errors.push(ValidationError::InvalidPageSize(*size));
        }
    }
    if table.default_page_size > 0
        && !table.page_size_options.is_empty()
        && !table.page_size_options.contains(&table.default_page_size)
    {
        errors.push(ValidationError::DefaultPageSizeNotOffered(table.default_page_size));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::UnknownLogFormat(other.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
