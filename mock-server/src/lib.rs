//! In-memory library API used for local development and end-to-end tests.
//!
//! Implements the books/loans REST contract under `/api`, including the stock
//! rules the real service enforces: registering a loan takes one copy,
//! returning it gives the copy back.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub isbn: String,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Returned,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub student_name: String,
    pub loan_date: String,
    pub return_date: Option<String>,
    pub status: LoanStatus,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub book_id: i64,
    pub student_name: String,
}

#[derive(Debug, Default)]
pub struct Store {
    books: BTreeMap<i64, Book>,
    loans: BTreeMap<i64, Loan>,
    next_book_id: i64,
    next_loan_id: i64,
}

impl Store {
    /// Insert a book directly, bypassing validation. Used for seeding.
    pub fn insert_book(&mut self, input: BookInput) -> Book {
        self.next_book_id += 1;
        let book = Book {
            id: self.next_book_id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            stock: input.stock,
            created_at: now(),
        };
        self.books.insert(book.id, book.clone());
        book
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error responses carry `{"message": ...}` like the real service.
#[derive(Debug)]
pub enum Rejection {
    NotFound,
    BadRequest(&'static str),
    Conflict(&'static str),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::NotFound => StatusCode::NOT_FOUND.into_response(),
            Rejection::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            Rejection::Conflict(message) => {
                (StatusCode::CONFLICT, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/loans", get(list_loans).post(create_loan))
        .route("/api/loans/active", get(list_active_loans))
        .route("/api/loans/{id}", get(get_loan))
        .route("/api/loans/{id}/return", put(return_loan))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn check_book(input: &BookInput) -> Result<(), Rejection> {
    if input.title.trim().is_empty() || input.author.trim().is_empty() || input.isbn.trim().is_empty()
    {
        return Err(Rejection::BadRequest("Todos los campos son requeridos"));
    }
    if input.stock < 0 {
        return Err(Rejection::BadRequest("El stock no puede ser negativo"));
    }
    Ok(())
}

fn isbn_taken(store: &Store, isbn: &str, except: Option<i64>) -> bool {
    store
        .books
        .values()
        .any(|b| b.isbn == isbn && Some(b.id) != except)
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.values().cloned().collect())
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, Rejection> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Book>), Rejection> {
    check_book(&input)?;
    let mut store = db.write().await;
    if isbn_taken(&store, &input.isbn, None) {
        return Err(Rejection::Conflict("Ya existe un libro con ese ISBN"));
    }
    let book = store.insert_book(input);
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<BookInput>,
) -> Result<StatusCode, Rejection> {
    check_book(&input)?;
    let mut store = db.write().await;
    if !store.books.contains_key(&id) {
        return Err(Rejection::NotFound);
    }
    if isbn_taken(&store, &input.isbn, Some(id)) {
        return Err(Rejection::Conflict("Ya existe un libro con ese ISBN"));
    }
    let book = store.books.get_mut(&id).ok_or(Rejection::NotFound)?;
    book.title = input.title;
    book.author = input.author;
    book.isbn = input.isbn;
    book.stock = input.stock;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store
        .books
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(Rejection::NotFound)
}

async fn list_loans(State(db): State<Db>) -> Json<Vec<Loan>> {
    let store = db.read().await;
    Json(store.loans.values().cloned().collect())
}

async fn list_active_loans(State(db): State<Db>) -> Json<Vec<Loan>> {
    let store = db.read().await;
    Json(
        store
            .loans
            .values()
            .filter(|l| l.status == LoanStatus::Active)
            .cloned()
            .collect(),
    )
}

async fn get_loan(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Loan>, Rejection> {
    let store = db.read().await;
    store.loans.get(&id).cloned().map(Json).ok_or(Rejection::NotFound)
}

async fn create_loan(
    State(db): State<Db>,
    Json(input): Json<LoanInput>,
) -> Result<(StatusCode, Json<Loan>), Rejection> {
    if input.student_name.trim().is_empty() {
        return Err(Rejection::BadRequest("El nombre del estudiante es requerido"));
    }
    let mut store = db.write().await;
    let book = store
        .books
        .get_mut(&input.book_id)
        .ok_or(Rejection::BadRequest("El libro no existe"))?;
    if book.stock <= 0 {
        return Err(Rejection::BadRequest("El libro no tiene stock disponible"));
    }
    book.stock -= 1;
    let book_title = book.title.clone();

    store.next_loan_id += 1;
    let stamp = now();
    let loan = Loan {
        id: store.next_loan_id,
        book_id: input.book_id,
        book_title,
        student_name: input.student_name,
        loan_date: stamp.clone(),
        return_date: None,
        status: LoanStatus::Active,
        created_at: stamp,
    };
    store.loans.insert(loan.id, loan.clone());
    Ok((StatusCode::CREATED, Json(loan)))
}

async fn return_loan(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    let loan = store.loans.get_mut(&id).ok_or(Rejection::NotFound)?;
    if loan.status == LoanStatus::Returned {
        return Err(Rejection::BadRequest("El préstamo ya fue devuelto"));
    }
    loan.status = LoanStatus::Returned;
    loan.return_date = Some(now());
    let book_id = loan.book_id;
    if let Some(book) = store.books.get_mut(&book_id) {
        book.stock += 1;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(isbn: &str, stock: i32) -> BookInput {
        BookInput {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: isbn.to_string(),
            stock,
        }
    }

    #[test]
    fn book_serializes_camel_case() {
        let mut store = Store::default();
        let book = store.insert_book(input("123", 0));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn ids_are_sequential() {
        let mut store = Store::default();
        assert_eq!(store.insert_book(input("1", 0)).id, 1);
        assert_eq!(store.insert_book(input("2", 0)).id, 2);
    }

    #[test]
    fn book_input_defaults_stock_to_zero() {
        let input: BookInput =
            serde_json::from_str(r#"{"title":"T","author":"A","isbn":"I"}"#).unwrap();
        assert_eq!(input.stock, 0);
    }

    #[test]
    fn check_book_rejects_blank_and_negative() {
        assert!(check_book(&input(" ", 1)).is_err());
        assert!(check_book(&input("9", -1)).is_err());
        assert!(check_book(&input("9", 0)).is_ok());
    }

    #[test]
    fn loan_input_requires_book_id() {
        let result: Result<LoanInput, _> = serde_json::from_str(r#"{"studentName":"Ana"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn isbn_uniqueness_ignores_the_book_itself() {
        let mut store = Store::default();
        let book = store.insert_book(input("123", 1));
        assert!(isbn_taken(&store, "123", None));
        assert!(!isbn_taken(&store, "123", Some(book.id)));
    }
}
