//! Secret values decoded from their base64 `data` map.

use crate::error::ApiError;
use crate::kubectl::resources::Secret;
use crate::kubectl::{Invocation, Kubectl, NamespaceScope};
use base64::{engine::general_purpose, Engine as _};

/// One key of a secret. `value` holds the decode error text when the
/// stored value is not valid base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub key: String,
    pub value: Result<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSecret {
    pub name: String,
    pub namespace: String,
    pub entries: Vec<DecodedEntry>,
}

pub fn decode_value(encoded: &str) -> Result<String, base64::DecodeError> {
    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Every key in name order.
pub fn decode_secret(secret: &Secret) -> Result<DecodedSecret, ApiError> {
    let data = secret_data(secret)?;
    let entries = data
        .iter()
        .map(|(key, encoded)| DecodedEntry {
            key: key.clone(),
            value: decode_value(encoded).map_err(|e| e.to_string()),
        })
        .collect();
    Ok(DecodedSecret {
        name: secret.metadata.name.clone(),
        namespace: secret.metadata.namespace.clone(),
        entries,
    })
}

pub fn secret_value(secret: &Secret, key: &str) -> Result<String, ApiError> {
    let data = secret_data(secret)?;
    let encoded = data.get(key).ok_or_else(|| ApiError::SecretData {
        name: secret.metadata.name.clone(),
        message: format!("key '{}' not found", key),
    })?;
    decode_value(encoded).map_err(|e| ApiError::SecretData {
        name: secret.metadata.name.clone(),
        message: format!("failed to decode key '{}': {}", key, e),
    })
}

fn secret_data(secret: &Secret) -> Result<&std::collections::BTreeMap<String, String>, ApiError> {
    secret.data.as_ref().ok_or_else(|| ApiError::SecretData {
        name: secret.metadata.name.clone(),
        message: "no data field".to_string(),
    })
}

/// `kubectl get secret <name> -n <ns> -o json`. The namespace must resolve.
pub fn fetch_secret(
    kubectl: &Kubectl,
    name: &str,
    namespace: Option<String>,
) -> Result<Secret, ApiError> {
    let namespace = namespace.ok_or_else(|| {
        ApiError::InvalidArgument(
            "namespace is required (use -n, or set a context default namespace)".to_string(),
        )
    })?;
    let output = kubectl.capture(
        Invocation::new(["get", "secret", name])
            .namespace(NamespaceScope::Named(namespace))
            .args(["-o", "json"]),
    )?;
    serde_json::from_str(&output).map_err(|source| ApiError::OutputParse {
        what: "secret",
        source,
    })
}
