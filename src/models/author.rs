//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub description: Option<String>,
}

impl Author {
    /// Abbreviated display name: "F. M. Lastname"
    pub fn short_name(&self) -> String {
        let first = self.first_name.chars().next();
        match (first, self.middle_name.as_ref().and_then(|m| m.chars().next())) {
            (Some(f), Some(m)) => format!("{}. {}. {}", f, m, self.last_name),
            (Some(f), None) => format!("{}. {}", f, self.last_name),
            (None, _) => self.last_name.clone(),
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: String,
    #[validate(length(max = 64, message = "Middle name must be at most 64 characters"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: String,
    pub description: Option<String>,
}

/// Update author request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 64, message = "First name must be 1-64 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 64, message = "Middle name must be at most 64 characters"))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Last name must be 1-64 characters"))]
    pub last_name: Option<String>,
    pub description: Option<String>,
}

/// Author list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    /// Substring search over first and last name
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(first: &str, middle: Option<&str>, last: &str) -> Author {
        Author {
            id: 1,
            first_name: first.to_string(),
            middle_name: middle.map(String::from),
            last_name: last.to_string(),
            description: None,
        }
    }

    #[test]
    fn short_name_without_middle() {
        assert_eq!(author("Test", None, "Author").short_name(), "T. Author");
    }

    #[test]
    fn short_name_with_middle() {
        assert_eq!(
            author("Test", Some("Mid"), "Author").short_name(),
            "T. M. Author"
        );
    }

    #[test]
    fn full_name_with_middle() {
        assert_eq!(
            author("Test", Some("Mid"), "Author").full_name(),
            "Test Mid Author"
        );
    }
}
