use rocket::Request;
use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the record store. Every driver failure is wrapped
/// exactly once and re-raised; nothing is retried or swallowed here.
#[derive(Error, Debug)]
pub enum ShelterError {
    #[error("could not connect to the record store: {0}")]
    Connection(#[source] mongodb::error::Error),
    #[error("authentication failed: {0}")]
    Authentication(#[source] mongodb::error::Error),
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("an error occurred while {op}: {source}")]
    StoreOperation {
        op: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
}

impl<'r> Responder<'r, 'static> for ShelterError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            ShelterError::InvalidArgument(_) => Status::BadRequest,
            ShelterError::Authentication(_) => Status::Unauthorized,
            ShelterError::Connection(_) => Status::BadGateway,
            ShelterError::StoreOperation { .. } => Status::InternalServerError,
        };

        let body = json!({
            "error": self.to_string(),
            "status": status.code
        })
        .to_string();

        Response::build()
            .status(status)
            .header(rocket::http::ContentType::JSON)
            .sized_body(body.len(), std::io::Cursor::new(body))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_argument_displays_its_reason() {
        let err = ShelterError::InvalidArgument("query is empty");
        assert_eq!(err.to_string(), "query is empty");
    }

    #[test]
    fn store_operation_carries_op_and_cause() {
        let cause = mongodb::error::Error::custom("socket closed");
        let err = ShelterError::StoreOperation {
            op: "inserting data",
            source: cause,
        };

        assert!(
            err.to_string()
                .starts_with("an error occurred while inserting data:")
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn connection_wraps_the_original_cause() {
        let cause = mongodb::error::Error::custom("no servers available");
        let err = ShelterError::Connection(cause);

        assert!(
            err.to_string()
                .starts_with("could not connect to the record store:")
        );
        assert!(err.source().is_some());
    }
}
