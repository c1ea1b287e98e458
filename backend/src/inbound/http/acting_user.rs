//! Acting-user extractor.
//!
//! Authentication happens upstream: the gateway forwards the verified user id
//! in the `X-User-Id` header. Handlers take [`ActingUser`] as an argument and
//! never read the header themselves.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Error, UserId};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(UserId);

impl ActingUser {
    /// Identifier of the acting user.
    pub fn user_id(self) -> UserId {
        self.0
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::unauthorized("authentication required"))?;
        let value = raw
            .to_str()
            .map_err(|_| Error::unauthorized("authentication required"))?;
        UserId::new(value).map(Self).map_err(|err| {
            warn!(error = %err, "rejecting malformed user id header");
            Error::unauthorized("authentication required")
        })
    }
}

impl FromRequest for ActingUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}
