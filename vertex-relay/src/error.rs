use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use vertex_core::{ConfigError, RuleError};

use crate::models::ErrorModel;
use crate::room::RoomId;

/// Everything a room request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("room {0} already exists")]
    RoomExists(RoomId),

    #[error("room {0} is full")]
    RoomFull(RoomId),

    #[error("too many open rooms (limit {0})")]
    TooManyRooms(usize),

    #[error("invalid room id {0:?}: expected 6 letters or digits")]
    InvalidRoomId(String),

    #[error("unknown seat token")]
    BadToken,

    #[error("not your turn")]
    NotYourTurn,

    #[error("waiting for an opponent to join")]
    WaitingForOpponent,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            RelayError::RoomExists(_) | RelayError::RoomFull(_) => StatusCode::CONFLICT,
            RelayError::TooManyRooms(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::InvalidRoomId(_) | RelayError::Config(_) => StatusCode::BAD_REQUEST,
            RelayError::BadToken | RelayError::NotYourTurn => StatusCode::FORBIDDEN,
            RelayError::WaitingForOpponent => StatusCode::CONFLICT,
            RelayError::Rule(RuleError::IllegalMove { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::Rule(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        (self.status(), Json(ErrorModel { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertex_core::{Cell, Player};

    #[test]
    fn test_status_codes() {
        let id: RoomId = "ABC123".parse().unwrap();
        assert_eq!(RelayError::RoomNotFound(id.clone()).status(), StatusCode::NOT_FOUND);
        assert_eq!(RelayError::RoomFull(id).status(), StatusCode::CONFLICT);
        assert_eq!(RelayError::BadToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            RelayError::from(RuleError::IllegalMove { to: Cell::new(0, 0) }).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RelayError::from(RuleError::GameOver { winner: Player::One }).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RelayError::from(ConfigError::BoardTooSmall { size: 1 }).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages() {
        let id: RoomId = "ABC123".parse().unwrap();
        assert_eq!(RelayError::RoomFull(id).to_string(), "room ABC123 is full");
        assert_eq!(
            RelayError::from(RuleError::IllegalMove { to: Cell::new(3, 4) }).to_string(),
            "illegal move to (3,4)"
        );
    }
}
