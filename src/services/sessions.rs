//! Borrow session management: the availability/date validator and the
//! review workflow around session records.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{
        availability::AvailabilityFact,
        session::{
            CreateSession, SessionAdminQuery, SessionDetails, SessionQuery, UpdateSession,
        },
    },
    repository::Repository,
    services::review::{guard_update, ReviewState},
};

#[derive(Clone)]
pub struct SessionsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

/// Evaluate the admission rules for a borrow request against the fetched
/// availability facts and the injected current date. Side-effect-free;
/// returns every violated rule so the caller can surface them all at once.
pub fn check_borrow_request(
    book_ids: &BTreeSet<i32>,
    facts: &[AvailabilityFact],
    library_title: &str,
    today: NaiveDate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    if book_ids.is_empty() {
        violations.push("No books requested".to_string());
    }

    let stocked: BTreeSet<i32> = facts.iter().map(|f| f.book_id).collect();
    for book_id in book_ids {
        if !stocked.contains(book_id) {
            violations.push(format!(
                "Book with id {} is not stocked at '{}'",
                book_id, library_title
            ));
        }
    }

    for fact in facts {
        if !fact.available {
            violations.push(format!(
                "'{}' is currently unavailable at '{}'",
                fact.book_title, library_title
            ));
        }
    }

    if start_date < today {
        violations.push(format!("Start date {} is in the past", start_date));
    }
    if start_date >= end_date {
        violations.push("Start date must be strictly before end date".to_string());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl SessionsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Create a borrow session for the authenticated user.
    ///
    /// The availability rows are read with a row lock inside the same
    /// transaction that inserts the session, so two concurrent requests
    /// for the last copy serialize at the database.
    pub async fn create_session(
        &self,
        user_id: i32,
        session: CreateSession,
    ) -> AppResult<SessionDetails> {
        let library = self.repository.libraries.get_by_id(session.library_id).await?;

        let book_ids: BTreeSet<i32> = session.book_ids.iter().copied().collect();
        let id_list: Vec<i32> = book_ids.iter().copied().collect();

        let mut tx = self.repository.pool.begin().await?;
        let facts = self
            .repository
            .availability
            .facts_for_update(&mut tx, &id_list, session.library_id)
            .await?;

        check_borrow_request(
            &book_ids,
            &facts,
            &library.title,
            self.clock.today(),
            session.start_date,
            session.end_date,
        )
        .map_err(AppError::rule_violations)?;

        let session_id = self.repository.sessions.insert(&mut tx, user_id, &session).await?;
        tx.commit().await?;

        tracing::info!(
            "Session {} created: user {} borrows {} book(s) from '{}'",
            session_id,
            user_id,
            id_list.len(),
            library.title
        );

        self.repository.sessions.get_details(session_id).await
    }

    /// List the caller's own sessions
    pub async fn my_sessions(
        &self,
        user_id: i32,
        query: &SessionQuery,
    ) -> AppResult<(Vec<SessionDetails>, i64)> {
        self.repository.sessions.list_for_user(user_id, query).await
    }

    /// Get one of the caller's own sessions
    pub async fn my_session(&self, user_id: i32, id: i32) -> AppResult<SessionDetails> {
        let details = self.repository.sessions.get_details(id).await?;
        if details.user.id != user_id {
            // Hide other users' sessions rather than acknowledging them
            return Err(AppError::NotFound(format!("Session with id {} not found", id)));
        }
        Ok(details)
    }

    /// Administrative search across all sessions
    pub async fn search(
        &self,
        query: &SessionAdminQuery,
    ) -> AppResult<(Vec<SessionDetails>, i64)> {
        self.repository.sessions.search(query).await
    }

    /// Get any session by ID (staff)
    pub async fn get_session(&self, id: i32) -> AppResult<SessionDetails> {
        self.repository.sessions.get_details(id).await
    }

    /// Apply a staff update, enforcing the one-way acceptance and terminal
    /// closure rules against the existing record.
    pub async fn update_session(
        &self,
        id: i32,
        update: UpdateSession,
    ) -> AppResult<SessionDetails> {
        let existing = self.repository.sessions.get_by_id(id).await?;
        guard_update(
            ReviewState {
                is_accepted: existing.is_accepted,
                is_closed: existing.is_closed,
            },
            update.is_accepted,
        )?;
        self.repository.sessions.update(id, &update).await?;
        self.repository.sessions.get_details(id).await
    }

    /// Delete a session (staff)
    pub async fn delete_session(&self, id: i32) -> AppResult<()> {
        self.repository.sessions.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(book_id: i32, title: &str, available: bool) -> AvailabilityFact {
        AvailabilityFact {
            book_id,
            book_title: title.to_string(),
            available,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(values: &[i32]) -> BTreeSet<i32> {
        values.iter().copied().collect()
    }

    const TODAY: fn() -> NaiveDate = || day(2024, 6, 1);

    #[test]
    fn admits_valid_request() {
        let facts = vec![fact(1, "Dune", true), fact(2, "Solaris", true)];
        let result = check_borrow_request(
            &ids(&[1, 2]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 6, 1),
            day(2024, 6, 15),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_empty_book_list() {
        let violations = check_borrow_request(
            &ids(&[]),
            &[],
            "Central",
            TODAY(),
            day(2024, 6, 2),
            day(2024, 6, 15),
        )
        .unwrap_err();
        assert_eq!(violations, vec!["No books requested".to_string()]);
    }

    #[test]
    fn rejects_book_not_stocked_at_library() {
        let facts = vec![fact(1, "Dune", true)];
        let violations = check_borrow_request(
            &ids(&[1, 7]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 6, 2),
            day(2024, 6, 15),
        )
        .unwrap_err();
        assert_eq!(
            violations,
            vec!["Book with id 7 is not stocked at 'Central'".to_string()]
        );
    }

    #[test]
    fn rejects_out_of_stock_book() {
        let facts = vec![fact(1, "Dune", true), fact(2, "Solaris", false)];
        let violations = check_borrow_request(
            &ids(&[1, 2]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 6, 2),
            day(2024, 6, 15),
        )
        .unwrap_err();
        assert_eq!(
            violations,
            vec!["'Solaris' is currently unavailable at 'Central'".to_string()]
        );
    }

    #[test]
    fn rejects_start_date_in_past() {
        let facts = vec![fact(1, "Dune", true)];
        let violations = check_borrow_request(
            &ids(&[1]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 5, 31),
            day(2024, 6, 15),
        )
        .unwrap_err();
        assert_eq!(
            violations,
            vec!["Start date 2024-05-31 is in the past".to_string()]
        );
    }

    #[test]
    fn start_today_is_admitted() {
        let facts = vec![fact(1, "Dune", true)];
        assert!(check_borrow_request(
            &ids(&[1]),
            &facts,
            "Central",
            TODAY(),
            TODAY(),
            day(2024, 6, 2),
        )
        .is_ok());
    }

    #[test]
    fn rejects_start_not_before_end() {
        let facts = vec![fact(1, "Dune", true)];
        let violations = check_borrow_request(
            &ids(&[1]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 6, 10),
            day(2024, 6, 10),
        )
        .unwrap_err();
        assert_eq!(
            violations,
            vec!["Start date must be strictly before end date".to_string()]
        );
    }

    #[test]
    fn collects_all_violations_together() {
        let facts = vec![fact(2, "Solaris", false)];
        let violations = check_borrow_request(
            &ids(&[2, 9]),
            &facts,
            "Central",
            TODAY(),
            day(2024, 5, 1),
            day(2024, 4, 1),
        )
        .unwrap_err();
        assert_eq!(violations.len(), 4);
        assert!(violations.iter().any(|v| v.contains("id 9")));
        assert!(violations.iter().any(|v| v.contains("Solaris")));
        assert!(violations.iter().any(|v| v.contains("in the past")));
        assert!(violations.iter().any(|v| v.contains("strictly before")));
    }
}
