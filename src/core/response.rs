use crate::core::error::ContractResult;

/// Result of one invocation as seen by the host.
///
/// A success without payload carries an empty byte vector; the contract does
/// not distinguish "nothing stored" from "empty value".
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Response {
    Success(Vec<u8>),
    Error(String)
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Response {
        Response::Success(payload)
    }

    pub fn empty() -> Response {
        Response::Success(Vec::new())
    }

    pub fn error(message: impl Into<String>) -> Response {
        Response::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success(payload) => Some(payload.as_slice()),
            Response::Error(_) => None
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success(_) => None,
            Response::Error(message) => Some(message.as_str())
        }
    }
}

impl From<ContractResult<Vec<u8>>> for Response {
    fn from(result: ContractResult<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Response::Success(payload),
            Err(err) => Response::Error(err.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::core::{ContractError, ContractResult, Response};

    #[test]
    fn from_error_keeps_message_only() {
        let result: ContractResult<Vec<u8>> = Err(ContractError::ArgumentCount { expected: 2 });
        let response = Response::from(result);
        assert!(!response.is_success());
        assert_eq!(response.payload(), None);
        assert_eq!(response.message(), Some("Incorrect number of arguments. Expecting 2"));
    }

    #[test]
    fn empty_success() {
        let response = Response::empty();
        assert!(response.is_success());
        assert_eq!(response.payload(), Some(&[][..]));
        assert_eq!(response.message(), None);
    }
}
