use rocket::{
    http::{ContentType, Status},
    response::{self, Responder},
    Request, Response,
};

use crate::Error;

/// HTTP response builder for Error enum
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            Error::IncorrectData { .. } => Status::BadRequest,
            Error::DatabaseError { .. } => Status::InternalServerError,
            Error::InternalError => Status::InternalServerError,
            Error::RenderFail => Status::InternalServerError,
            Error::DuplicateEmail => Status::BadRequest,
            Error::ReservedAccount => Status::Forbidden,
            Error::UnknownAccount => Status::NotFound,
            Error::UnknownOrExpiredCode => Status::BadRequest,
            Error::InvalidCode => Status::BadRequest,
            Error::InvalidCredentials => Status::Unauthorized,
            Error::PendingApproval => Status::Forbidden,
            Error::UnverifiedAccount => Status::Forbidden,
            Error::ShortPassword => Status::BadRequest,
            Error::EmailFailed { .. } => Status::InternalServerError,
        };

        // Serialize the error data structure into JSON.
        let string = json!(self).to_string();

        // Build and send the request.
        Response::build()
            .sized_body(string.len(), std::io::Cursor::new(string))
            .header(ContentType::new("application", "json"))
            .status(status)
            .ok()
    }
}
