use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Repository failure, already classified (conflict, database, ...).
    #[error(transparent)]
    Storage(#[from] AppError),

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("email already in use")]
    EmailInUse,

    #[error("user not found")]
    UserNotFound,

    #[error("contact not found")]
    ContactNotFound,

    #[error("address not found")]
    AddressNotFound,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Storage(e) => e,
            ServiceError::Validation(msg) => AppError::bad_request(msg),
            ServiceError::Unauthorized => AppError::unauthorized("Unauthorized"),
            e @ ServiceError::InvalidCredentials => AppError::unauthorized(e.to_string()),
            e @ (ServiceError::UserAlreadyExists | ServiceError::EmailInUse) => {
                AppError::conflict(e.to_string())
            }
            e @ (ServiceError::UserNotFound
            | ServiceError::ContactNotFound
            | ServiceError::AddressNotFound) => AppError::not_found(e.to_string()),
        }
    }
}
