//! Response normalization for the two backend envelope conventions.
//!
//! ```text
//! flat:  { code, msg, data }  success ⇔ String(code) == success_code
//! raw:   { code, data, msg }  success ⇔ code == 200 (numeric)
//! ```
//! Both yield the business payload `data` on success.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::service::codes::{code_to_string, CodePolicyTable};

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

/// A business-level failure carried in a well-formed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    pub code: String,
    pub msg: String,
}

impl BackendFailure {
    pub fn into_error(self) -> ClientError {
        ClientError::Backend {
            code: self.code,
            msg: self.msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Success(Value),
    Failure(BackendFailure),
}

fn parse(body: &[u8]) -> ClientResult<Envelope> {
    serde_json::from_slice(body)
        .map_err(|e| ClientError::Decode(format!("response is not a backend envelope: {}", e)))
}

/// Flat envelope policy.
pub fn normalize_flat(body: &[u8], table: &CodePolicyTable) -> ClientResult<Normalized> {
    let envelope = parse(body)?;
    if table.is_success(&envelope.code) {
        Ok(Normalized::Success(envelope.data))
    } else {
        Ok(Normalized::Failure(BackendFailure {
            code: code_to_string(&envelope.code),
            msg: envelope.msg,
        }))
    }
}

/// Raw envelope policy.
pub fn normalize_raw(body: &[u8]) -> ClientResult<Normalized> {
    let envelope = parse(body)?;
    if envelope.code.as_i64() == Some(200) {
        Ok(Normalized::Success(envelope.data))
    } else {
        Ok(Normalized::Failure(BackendFailure {
            code: code_to_string(&envelope.code),
            msg: envelope.msg,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use serde_json::json;

    fn table() -> CodePolicyTable {
        CodePolicyTable::from_config(&ServiceConfig::default())
    }

    #[test]
    fn test_flat_success_yields_inner_data() {
        let body = br#"{"code":"0000","msg":"ok","data":{"list":[],"page":{"total":0}}}"#;
        match normalize_flat(body, &table()).unwrap() {
            Normalized::Success(data) => assert_eq!(data, json!({"list":[],"page":{"total":0}})),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_flat_numeric_code_failure() {
        let body = br#"{"code":9999,"msg":"token expired"}"#;
        assert_eq!(
            normalize_flat(body, &table()).unwrap(),
            Normalized::Failure(BackendFailure {
                code: "9999".into(),
                msg: "token expired".into(),
            })
        );
    }

    #[test]
    fn test_raw_requires_numeric_200() {
        let ok = br#"{"code":200,"data":{"token":"t"},"msg":""}"#;
        assert_eq!(
            normalize_raw(ok).unwrap(),
            Normalized::Success(json!({"token":"t"}))
        );

        let stringly = br#"{"code":"200","data":null,"msg":"bad"}"#;
        assert!(matches!(normalize_raw(stringly).unwrap(), Normalized::Failure(_)));
    }

    #[test]
    fn test_not_an_envelope() {
        let err = normalize_flat(b"<html>", &table()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
