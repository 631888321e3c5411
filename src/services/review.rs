//! Shared mutation rules for records that go through staff review
//! (borrow sessions and donation offers): acceptance is one-way,
//! closure is terminal.

use crate::error::{AppError, AppResult};

/// Review flags of an existing session/offer row
#[derive(Debug, Clone, Copy)]
pub struct ReviewState {
    pub is_accepted: bool,
    pub is_closed: bool,
}

/// Check an incoming update against the review flags of the existing record.
///
/// * A closed record rejects any update.
/// * An accepted record rejects an update that clears `is_accepted`.
pub fn guard_update(existing: ReviewState, incoming_accepted: Option<bool>) -> AppResult<()> {
    if existing.is_closed {
        return Err(AppError::Conflict(
            "Record is closed; no further edits are permitted".to_string(),
        ));
    }
    if existing.is_accepted && incoming_accepted == Some(false) {
        return Err(AppError::Conflict(
            "Acceptance cannot be revoked".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: ReviewState = ReviewState {
        is_accepted: false,
        is_closed: false,
    };
    const ACCEPTED: ReviewState = ReviewState {
        is_accepted: true,
        is_closed: false,
    };
    const CLOSED: ReviewState = ReviewState {
        is_accepted: true,
        is_closed: true,
    };

    #[test]
    fn open_record_accepts_any_update() {
        assert!(guard_update(OPEN, None).is_ok());
        assert!(guard_update(OPEN, Some(true)).is_ok());
        assert!(guard_update(OPEN, Some(false)).is_ok());
    }

    #[test]
    fn closed_record_rejects_everything() {
        for incoming in [None, Some(true), Some(false)] {
            let err = guard_update(CLOSED, incoming).unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)), "{:?}", err);
        }
    }

    #[test]
    fn acceptance_is_one_way() {
        let err = guard_update(ACCEPTED, Some(false)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "{:?}", err);
    }

    #[test]
    fn accepted_record_allows_other_updates() {
        assert!(guard_update(ACCEPTED, None).is_ok());
        // Re-sending the already-set flag is a no-op, not a revocation
        assert!(guard_update(ACCEPTED, Some(true)).is_ok());
    }

    #[test]
    fn closed_but_never_accepted_still_terminal() {
        let state = ReviewState {
            is_accepted: false,
            is_closed: true,
        };
        assert!(guard_update(state, None).is_err());
    }
}
