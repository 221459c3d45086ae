//! Role extraction from bearer-token claims.
//!
//! The token is decoded, never verified: the signature is the API's concern
//! and the roles read here only decide which controls the UI shows. Every
//! mutating request is still authorized server-side.
//!
//! ERROR HANDLING
//! ==============
//! Missing, malformed, or undecodable tokens all yield an empty `RoleSet`.
//! Decode failures are logged for diagnostics and never reach the caller.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

/// Claim key the farm API uses for role membership.
pub const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Short-form alias accepted when the long claim is absent.
pub const ROLE_CLAIM_SHORT: &str = "role";

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Ordered role names taken from the token's role claim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        Self(roles)
    }
}

impl<'a> FromIterator<&'a str> for RoleSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_owned).collect())
    }
}

/// Split a token into its payload segment when it has exactly three
/// non-empty dot-separated segments.
fn payload_segment(token: &str) -> Option<&str> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return None;
    }
    Some(payload)
}

/// Decode a base64url payload segment into its claims object.
///
/// Standard-alphabet characters are folded into the URL-safe alphabet first,
/// since some issuers pad or mix alphabets.
pub(crate) fn decode_claims(segment: &str) -> Result<serde_json::Map<String, Value>, String> {
    let normalized: String = segment
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_LENIENT
        .decode(normalized.as_bytes())
        .map_err(|e| format!("invalid base64 payload: {e}"))?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("claims payload is not a JSON object".to_owned()),
        Err(e) => Err(format!("invalid claims JSON: {e}")),
    }
}

fn roles_from_claim(value: &Value) -> Vec<String> {
    match value {
        Value::String(role) => vec![role.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract the caller's roles from `token`.
///
/// Returns an empty set for absent or structurally invalid tokens and for any
/// decode failure.
pub fn extract_roles(token: Option<&str>) -> RoleSet {
    let Some(segment) = token.and_then(payload_segment) else {
        return RoleSet::default();
    };
    match decode_claims(segment) {
        Ok(claims) => claims
            .get(ROLE_CLAIM)
            .or_else(|| claims.get(ROLE_CLAIM_SHORT))
            .map(roles_from_claim)
            .map(RoleSet::from)
            .unwrap_or_default(),
        Err(e) => {
            log::warn!("ignoring undecodable token: {e}");
            RoleSet::default()
        }
    }
}
