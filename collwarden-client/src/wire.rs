//! Response envelopes of the bookmark service.

use serde::Deserialize;

use collwarden_core::UserId;

/// Every endpoint wraps its payload as `{ "response": ... }`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: T,
}

/// Only the id is read from user records; everything else is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    pub id: UserId,
}

#[cfg(test)]
mod tests {
    use collwarden_core::Collection;

    use super::*;

    #[test]
    fn user_envelope_ignores_extra_fields() {
        let body = r#"{"response":[{"id":1,"username":"admin","email":null},{"id":7,"name":"Ana"}]}"#;
        let parsed: Envelope<Vec<UserRecord>> = serde_json::from_str(body).expect("parse");
        let ids: Vec<i64> = parsed.response.iter().map(|u| u.id.0).collect();
        assert_eq!(ids, [1, 7]);
    }

    #[test]
    fn envelope_without_response_is_an_error() {
        let body = r#"{"data":[]}"#;
        assert!(serde_json::from_str::<Envelope<Vec<Collection>>>(body).is_err());
    }
}
