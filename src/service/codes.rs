//! Backend code → policy table.
//!
//! Built once from [`ServiceConfig`]; when a code appears in several lists the
//! first of silent logout, modal logout, token refresh wins (validation
//! rejects that case for loaded configs).

use std::collections::HashMap;

use serde_json::Value;

use crate::config::ServiceConfig;

/// What the interceptor does with a failing backend code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePolicy {
    SilentLogout,
    ModalLogout,
    RefreshToken,
}

impl CodePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePolicy::SilentLogout => "silent_logout",
            CodePolicy::ModalLogout => "modal_logout",
            CodePolicy::RefreshToken => "refresh_token",
        }
    }
}

/// Stringify an envelope code the way the backend contract compares it.
pub fn code_to_string(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct CodePolicyTable {
    success_code: String,
    policies: HashMap<String, CodePolicy>,
}

impl CodePolicyTable {
    pub fn from_config(service: &ServiceConfig) -> Self {
        let mut policies = HashMap::new();
        let ordered = [
            (CodePolicy::SilentLogout, &service.logout_codes),
            (CodePolicy::ModalLogout, &service.modal_logout_codes),
            (CodePolicy::RefreshToken, &service.expired_token_codes),
        ];
        for (policy, codes) in ordered {
            for code in codes {
                policies.entry(code.clone()).or_insert(policy);
            }
        }

        Self {
            success_code: service.success_code.clone(),
            policies,
        }
    }

    pub fn success_code(&self) -> &str {
        &self.success_code
    }

    /// Flat-envelope success test: `String(code) == success_code`.
    pub fn is_success(&self, code: &Value) -> bool {
        code_to_string(code) == self.success_code
    }

    pub fn classify(&self, code: &str) -> Option<CodePolicy> {
        self.policies.get(code).copied()
    }

    /// Codes whose failures already have dedicated feedback (or none by
    /// design) and must not raise the generic error toast.
    pub fn suppresses_notification(&self, code: &str) -> bool {
        self.classify(code).is_some()
    }
}
