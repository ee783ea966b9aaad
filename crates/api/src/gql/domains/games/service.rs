use chrono::Utc;
use thiserror::Error;

use infra::models::GameRow;
use infra::repos::{GamePatch, GameState};
use infra::{Store, StoreError};

use crate::gql::error::GqlError;

pub const MAX_USERNAME_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum WinnerError {
    #[error("username must not be blank")]
    BlankUsername,

    #[error("username must be at most {MAX_USERNAME_LEN} characters")]
    UsernameTooLong,

    #[error("no game is in progress")]
    NoActiveGame,

    #[error("game {0} is no longer in progress")]
    AlreadyDecided(i32),

    #[error("game {0} not found after update")]
    Vanished(i32),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<WinnerError> for GqlError {
    fn from(e: WinnerError) -> Self {
        match e {
            WinnerError::BlankUsername | WinnerError::UsernameTooLong => {
                GqlError::validation(e.to_string())
            }
            WinnerError::NoActiveGame | WinnerError::Vanished(_) => {
                GqlError::NotFound(e.to_string())
            }
            WinnerError::AlreadyDecided(_) => GqlError::Conflict(e.to_string()),
            WinnerError::Store(store) => store.into(),
        }
    }
}

/// Trim `raw` and check it is usable as a winner name.
pub fn validate_username(raw: &str) -> Result<&str, WinnerError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(WinnerError::BlankUsername);
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(WinnerError::UsernameTooLong);
    }
    Ok(username)
}

/// Record `username` as the winner of the active game.
///
/// The update only applies while the game is still in progress, so when two
/// callers race exactly one of them wins and the other gets `AlreadyDecided`.
/// The caller (resolver) is responsible for validating the username and for
/// publishing the `gameWon` event.
pub async fn declare_winner(store: &dyn Store, username: &str) -> Result<GameRow, WinnerError> {
    let game = store
        .find_active_game()
        .await?
        .ok_or(WinnerError::NoActiveGame)?;

    let patch = GamePatch {
        state: Some(GameState::Won),
        winner: Some(username.to_string()),
        end_time: Some(Utc::now()),
    };
    let applied = store
        .update_game(game.id, patch, Some(GameState::InProgress))
        .await?;
    if !applied {
        return Err(WinnerError::AlreadyDecided(game.id));
    }

    store
        .find_game(game.id)
        .await?
        .ok_or(WinnerError::Vanished(game.id))
}
