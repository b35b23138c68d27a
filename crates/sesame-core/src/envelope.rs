//! The uniform result record returned across the service boundary.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::Error;

/// Either the data of a successful operation or a classified failure.
///
/// Serialises as `{"success":true,"data":...}` or
/// `{"success":false,"kind":...,"error":...,"code":...}` so no error type
/// has to leak past the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult<T> {
    Success {
        data: T,
    },
    Failure {
        kind: String,
        message: String,
        code: String,
    },
}

impl<T> AuthResult<T> {
    pub fn success(data: T) -> Self {
        AuthResult::Success { data }
    }

    /// The failure code, if this is a failure.
    pub fn code(&self) -> Option<&str> {
        match self {
            AuthResult::Success { .. } => None,
            AuthResult::Failure { code, .. } => Some(code),
        }
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthResult::Success { .. } => None,
            AuthResult::Failure { message, .. } => Some(message),
        }
    }
}

impl<T, E> From<Result<T, E>> for AuthResult<T>
where
    E: Into<Error>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => AuthResult::Success { data },
            Err(e) => {
                let err: Error = e.into();
                AuthResult::Failure {
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                    code: err.code().to_string(),
                }
            }
        }
    }
}

impl<T: Serialize> Serialize for AuthResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AuthResult::Success { data } => {
                let mut state = serializer.serialize_struct("AuthResult", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            AuthResult::Failure {
                kind,
                message,
                code,
            } => {
                let mut state = serializer.serialize_struct("AuthResult", 4)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("kind", kind)?;
                state.serialize_field("error", message)?;
                state.serialize_field("code", code)?;
                state.end()
            }
        }
    }
}
