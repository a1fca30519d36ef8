use std::collections::btree_map;
use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::errors::ClaimError;

/// Payload key carrying the expiry timestamp. Never accepted as a caller claim.
pub const EXPIRY_CLAIM: &str = "exp";

/// Flat, caller-supplied claim set.
///
/// Keys are unique and every value is a string. The expiry key is reserved
/// by the token format and rejected by every constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, String>);

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a claim, returning the previous value for that key.
    ///
    /// # Errors
    /// * `ReservedClaim` - `name` is the expiry key
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, ClaimError> {
        let name = name.into();
        if name == EXPIRY_CLAIM {
            return Err(ClaimError::ReservedClaim(name));
        }
        Ok(self.0.insert(name, value.into()))
    }

    /// Builder-style `insert`.
    pub fn with_claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ClaimError> {
        self.insert(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl TryFrom<BTreeMap<String, String>> for ClaimSet {
    type Error = ClaimError;

    fn try_from(claims: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if claims.contains_key(EXPIRY_CLAIM) {
            return Err(ClaimError::ReservedClaim(EXPIRY_CLAIM.to_string()));
        }
        Ok(Self(claims))
    }
}

impl TryFrom<HashMap<String, String>> for ClaimSet {
    type Error = ClaimError;

    fn try_from(claims: HashMap<String, String>) -> Result<Self, Self::Error> {
        Self::try_from(claims.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Signed token body: caller claims flattened next to the expiry.
///
/// Claim values are typed as strings, so a payload carrying any other JSON
/// type fails to deserialize instead of being coerced.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TokenPayload {
    #[serde(flatten)]
    pub claims: BTreeMap<String, String>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenPayload {
    pub fn new(claims: &ClaimSet, exp: i64) -> Self {
        Self {
            claims: claims.0.clone(),
            exp: Some(exp),
        }
    }

    /// Split the payload back into the caller's claims.
    pub fn into_claims(self) -> ClaimSet {
        // `exp` is bound to its own field during deserialization, so the
        // flattened map can never hold it.
        ClaimSet(self.claims)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= current_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut claims = ClaimSet::new();
        assert_eq!(claims.insert("email", "a@example.com").unwrap(), None);
        assert_eq!(
            claims.insert("email", "b@example.com").unwrap(),
            Some("a@example.com".to_string())
        );

        assert_eq!(claims.get("email"), Some("b@example.com"));
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_reserved_claim_rejected() {
        let result = ClaimSet::new().with_claim(EXPIRY_CLAIM, "9999999999");
        assert!(matches!(result, Err(ClaimError::ReservedClaim(_))));

        let mut map = HashMap::new();
        map.insert("exp".to_string(), "1".to_string());
        assert!(ClaimSet::try_from(map).is_err());
    }

    #[test]
    fn test_payload_serializes_flat() {
        let claims = ClaimSet::new()
            .with_claim("email", "a@example.com")
            .unwrap()
            .with_claim("role", "admin")
            .unwrap();

        let value = serde_json::to_value(TokenPayload::new(&claims, 1000)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"email": "a@example.com", "role": "admin", "exp": 1000})
        );
    }

    #[test]
    fn test_payload_strips_expiry() {
        let payload: TokenPayload =
            serde_json::from_str(r#"{"email":"a@example.com","exp":1000}"#).unwrap();
        assert_eq!(payload.exp, Some(1000));

        let claims = payload.into_claims();
        assert_eq!(claims.get("email"), Some("a@example.com"));
        assert_eq!(claims.get(EXPIRY_CLAIM), None);
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_payload_rejects_non_string_claims() {
        let result = serde_json::from_str::<TokenPayload>(r#"{"admin":true,"exp":1000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_expired() {
        let payload = TokenPayload {
            claims: BTreeMap::new(),
            exp: Some(1000),
        };

        assert!(!payload.is_expired(999));
        assert!(payload.is_expired(1000));
        assert!(payload.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let payload = TokenPayload {
            claims: BTreeMap::new(),
            exp: None,
        };
        assert!(payload.is_expired(0));
    }
}
