//! Wire DTOs for the library API.
//!
//! # Design
//! These mirror the server schema (camelCase JSON) but are defined
//! independently of the mock-server crate; the end-to-end tests catch schema
//! drift. Timestamps stay as the server's strings and are only parsed for
//! display (see `format`).

use serde::{Deserialize, Serialize};

pub type BookId = i64;
pub type LoanId = i64;

/// A book record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
    pub created_at: String,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating or updating a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default)]
    pub stock: i32,
}

impl From<&Book> for CreateBook {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            stock: book.stock,
        }
    }
}

/// Lifecycle state of a loan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoanStatus {
    Active,
    Returned,
}

/// A loan record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub book_id: BookId,
    pub book_title: String,
    pub student_name: String,
    pub loan_date: String,
    pub return_date: Option<String>,
    pub status: LoanStatus,
    pub created_at: String,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

/// Payload for registering a loan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoan {
    pub book_id: BookId,
    pub student_name: String,
}
