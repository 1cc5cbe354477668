//! Lend/return state of a physical book.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the physical copy is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LendingStatus {
    OnShelf,
    LentOut,
}

/// Lending state with the borrower attached to the lent-out case, so a
/// borrower exists exactly when the book is out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lending {
    #[default]
    OnShelf,
    LentOut { borrower: String },
}

/// Lending a book that is already out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("book is already lent to {borrower}")]
pub struct AlreadyLent {
    pub borrower: String,
}

impl Lending {
    pub fn status(&self) -> LendingStatus {
        match self {
            Lending::OnShelf => LendingStatus::OnShelf,
            Lending::LentOut { .. } => LendingStatus::LentOut,
        }
    }

    pub fn borrower(&self) -> Option<&str> {
        match self {
            Lending::OnShelf => None,
            Lending::LentOut { borrower } => Some(borrower),
        }
    }

    /// Hand the book to `borrower`. Only a book on the shelf can be lent;
    /// the current borrower is never overwritten.
    pub fn lend(&self, borrower: impl Into<String>) -> Result<Lending, AlreadyLent> {
        match self {
            Lending::OnShelf => Ok(Lending::LentOut {
                borrower: borrower.into(),
            }),
            Lending::LentOut { borrower } => Err(AlreadyLent {
                borrower: borrower.clone(),
            }),
        }
    }

    /// Put the book back. Returning a book that is already on the shelf is fine.
    pub fn return_to_shelf(&self) -> Lending {
        Lending::OnShelf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_books_start_on_the_shelf() {
        let lending = Lending::default();
        assert_eq!(lending.status(), LendingStatus::OnShelf);
        assert_eq!(lending.borrower(), None);
    }

    #[test]
    fn lend_moves_book_out_with_borrower() {
        let lent = Lending::OnShelf.lend("Alice").unwrap();
        assert_eq!(lent.status(), LendingStatus::LentOut);
        assert_eq!(lent.borrower(), Some("Alice"));
    }

    #[test]
    fn lending_twice_keeps_first_borrower() {
        let lent = Lending::OnShelf.lend("Alice").unwrap();
        let err = lent.lend("Bob").unwrap_err();
        assert_eq!(err.borrower, "Alice");
        assert_eq!(err.to_string(), "book is already lent to Alice");
        assert_eq!(lent.borrower(), Some("Alice"));
    }

    #[test]
    fn return_is_idempotent() {
        let lent = Lending::OnShelf.lend("Alice").unwrap();
        let back = lent.return_to_shelf();
        assert_eq!(back, Lending::OnShelf);
        assert_eq!(back.return_to_shelf(), Lending::OnShelf);
    }

    #[test]
    fn machine_cycles_indefinitely() {
        let mut state = Lending::default();
        for borrower in ["Alice", "Bob", "Carol"] {
            state = state.lend(borrower).unwrap();
            assert_eq!(state.borrower(), Some(borrower));
            state = state.return_to_shelf();
        }
        assert_eq!(state.status(), LendingStatus::OnShelf);
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&LendingStatus::LentOut).unwrap(),
            "\"LENT_OUT\""
        );
        let status: LendingStatus = serde_json::from_str("\"ON_SHELF\"").unwrap();
        assert_eq!(status, LendingStatus::OnShelf);
    }
}
