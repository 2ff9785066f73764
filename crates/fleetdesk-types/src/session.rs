use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::unwrap_object;
use crate::NormalizeError;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// One day.
pub const ACCESS_TOKEN_MAX_AGE_SECS: u64 = 86_400;
/// Seven days.
pub const REFRESH_TOKEN_MAX_AGE_SECS: u64 = 604_800;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

fn token(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .filter_map(Value::as_str)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Token pair from a login or refresh response. Tokens may sit at the top
/// level, under `data`, or under `data.tokens`, in either key casing.
pub fn normalize_token_pair(body: Value) -> Result<TokenPair, NormalizeError> {
    let body = unwrap_object(body)?;
    let scope = body.get("tokens").filter(|t| t.is_object()).unwrap_or(&body);

    Ok(TokenPair {
        access_token: token(scope, &["accessToken", "access_token"])
            .ok_or(NormalizeError::MissingField("accessToken"))?,
        refresh_token: token(scope, &["refreshToken", "refresh_token"])
            .ok_or(NormalizeError::MissingField("refreshToken"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_pair_top_level() {
        let pair =
            normalize_token_pair(json!({ "accessToken": "a", "refreshToken": "r" })).unwrap();
        assert_eq!(pair.access_token, "a");
        assert_eq!(pair.refresh_token, "r");
    }

    #[test]
    fn token_pair_wrapped_snake_case() {
        let pair = normalize_token_pair(json!({
            "success": true,
            "data": { "access_token": "a", "refresh_token": "r" }
        }))
        .unwrap();
        assert_eq!(pair, TokenPair { access_token: "a".into(), refresh_token: "r".into() });
    }

    #[test]
    fn token_pair_requires_both() {
        let err = normalize_token_pair(json!({ "accessToken": "a" })).unwrap_err();
        assert_eq!(err, NormalizeError::MissingField("refreshToken"));
    }

    #[test]
    fn refresh_request_wire_shape() {
        let body = serde_json::to_value(RefreshRequest { refresh_token: "r".into() }).unwrap();
        assert_eq!(body, json!({ "refreshToken": "r" }));
    }
}
