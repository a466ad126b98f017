//! The generic success/error/payload wrapper every structured API call
//! returns.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Wire envelope for a structured API response.
///
/// The server's contract is `success == true` iff `error` is absent, and
/// `data` is only meaningful on success. [`Envelope::into_data`] enforces
/// that contract; a violation is a protocol error, never a defaulted
/// payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub error: Option<ApiError>,
    pub data: Option<T>,
}

/// Application-level error reported inside an envelope.
///
/// The server transmits only numeric codes; translating them to text is a
/// presentation concern, not part of the wire model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SubError>,
}

/// Per-item detail attached to some API errors (e.g. one entry per failed
/// path in a multi-path operation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubError {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// # Returns
    ///
    /// * `Ok(data)` - `success: true` with a payload present.
    /// * `Err(Error::Api)` - `success: false`; code and sub-errors verbatim.
    /// * `Err(Error::Protocol)` - the success/error/data invariant does not
    ///   hold (error alongside success, or success with no payload).
    pub fn into_data(self) -> Result<T, Error> {
        match (self.success, self.error) {
            (true, Some(_)) => Err(Error::protocol(
                "envelope reports success but carries an error",
            )),
            (true, None) => self
                .data
                .ok_or_else(|| Error::protocol("envelope reports success but carries no data")),
            (false, Some(error)) => Err(Error::Api {
                code: error.code,
                errors: error.errors,
            }),
            (false, None) => Err(Error::protocol(
                "envelope reports failure but carries no error",
            )),
        }
    }

    /// Unwrap an envelope whose success shape carries no payload
    /// (e.g. logout).
    ///
    /// Same contract as [`Envelope::into_data`], except a `data`-less
    /// success is the expected shape rather than a protocol error. Any
    /// `data` that is present is ignored.
    pub fn into_unit(self) -> Result<(), Error> {
        match (self.success, self.error) {
            (true, Some(_)) => Err(Error::protocol(
                "envelope reports success but carries an error",
            )),
            (true, None) => Ok(()),
            (false, Some(error)) => Err(Error::Api {
                code: error.code,
                errors: error.errors,
            }),
            (false, None) => Err(Error::protocol(
                "envelope reports failure but carries no error",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Envelope<serde_json::Value> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn success_with_data() {
        let envelope = decode(r#"{"success":true,"data":{"sid":"abc"}}"#);
        let data = envelope.into_data().unwrap();
        assert_eq!(data["sid"], "abc");
    }

    #[test]
    fn failure_surfaces_code_and_sub_errors() {
        let envelope = decode(
            r#"{"success":false,"error":{"code":408,"errors":[{"code":408,"path":"/missing"}]}}"#,
        );
        match envelope.into_data() {
            Err(Error::Api { code, errors }) => {
                assert_eq!(code, 408);
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path.as_deref(), Some("/missing"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn success_without_data_is_a_protocol_error() {
        let envelope = decode(r#"{"success":true}"#);
        assert!(matches!(envelope.into_data(), Err(Error::Protocol { .. })));
    }

    #[test]
    fn failure_without_error_is_a_protocol_error() {
        let envelope = decode(r#"{"success":false}"#);
        assert!(matches!(envelope.into_data(), Err(Error::Protocol { .. })));
    }

    #[test]
    fn success_with_error_is_a_protocol_error() {
        let envelope = decode(r#"{"success":true,"error":{"code":119},"data":{}}"#);
        assert!(matches!(envelope.into_data(), Err(Error::Protocol { .. })));
    }

    #[test]
    fn unit_success_needs_no_data() {
        assert!(decode(r#"{"success":true}"#).into_unit().is_ok());
        assert!(decode(r#"{"success":true,"data":{}}"#).into_unit().is_ok());
    }

    #[test]
    fn unit_failure_still_surfaces_code() {
        let envelope = decode(r#"{"success":false,"error":{"code":106}}"#);
        assert!(matches!(envelope.into_unit(), Err(Error::Api { code: 106, .. })));
    }

    #[test]
    fn unit_failure_without_error_is_a_protocol_error() {
        let envelope = decode(r#"{"success":false}"#);
        assert!(matches!(envelope.into_unit(), Err(Error::Protocol { .. })));
    }
}
