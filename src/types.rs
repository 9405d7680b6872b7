use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde_json::json;
use crate::utils::try_respond;

pub trait Validate
where
    Self: Sized,
{
    type Error;
    fn validate(self) -> Result<Self, Self::Error>;
}

/// The normalized error taxonomy: every failure a handler can produce is one
/// of these, and the `Responder` impl is the single place that turns them
/// into `{ "msg": ... }` responses.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal,
}

impl ApiError {
    pub fn bad_request() -> ApiError {
        ApiError::BadRequest("Bad Request".to_string())
    }

    pub fn article_not_found(article_id: i32) -> ApiError {
        ApiError::NotFound(format!("Article {} not found", article_id))
    }
}

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> ApiError {
        match err {
            DieselError::NotFound => ApiError::NotFound("Not Found".to_string()),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation => ApiError::bad_request(),
                _ => {
                    error!("unhandled database error: {}", info.message());
                    ApiError::Internal
                }
            },
            other => {
                error!("unhandled database error: {:?}", other);
                ApiError::Internal
            }
        }
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (Status::BadRequest, msg),
            ApiError::NotFound(msg) => (Status::NotFound, msg),
            ApiError::Internal => (
                Status::InternalServerError,
                "internal server error".to_string(),
            ),
        };
        try_respond(req, &json!({ "msg": msg }), status)
    }
}

impl<T> Validate for Json<T>
where
    T: Validate,
{
    type Error = <T as Validate>::Error;
    fn validate(self) -> Result<Self, Self::Error> {
        let inner = self.0;
        let validated = inner.validate()?;
        Ok(Json(validated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("boom".to_string()))
    }

    #[test]
    fn missing_rows_normalize_to_not_found() {
        assert_eq!(
            ApiError::from(DieselError::NotFound),
            ApiError::NotFound("Not Found".to_string())
        );
    }

    #[test]
    fn constraint_violations_normalize_to_bad_request() {
        for kind in [
            DatabaseErrorKind::NotNullViolation,
            DatabaseErrorKind::ForeignKeyViolation,
            DatabaseErrorKind::CheckViolation,
        ] {
            assert_eq!(ApiError::from(database_error(kind)), ApiError::bad_request());
        }
    }

    #[test]
    fn anything_unrecognized_normalizes_to_internal() {
        assert_eq!(
            ApiError::from(database_error(DatabaseErrorKind::UniqueViolation)),
            ApiError::Internal
        );
        assert_eq!(
            ApiError::from(DieselError::RollbackTransaction),
            ApiError::Internal
        );
    }

    #[test]
    fn article_not_found_carries_the_id() {
        assert_eq!(
            ApiError::article_not_found(98),
            ApiError::NotFound("Article 98 not found".to_string())
        );
    }
}
