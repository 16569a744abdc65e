use axum::{
    http::StatusCode,
    response::{IntoResponse, Response}
};

pub(crate) enum ServerError {
    /// The contract answered with an error response.
    Rejected(String),
    /// The host failed around the contract call, e.g. a poisoned store lock.
    InternalError(anyhow::Error)
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(msg) =>
                (StatusCode::BAD_REQUEST, msg).into_response(),
            Self::InternalError(err) =>
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", err)).into_response()
        }
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>
{
    fn from(err: E) -> Self {
        Self::InternalError(err.into())
    }
}
