//! Stateless HTTP request builder and response parser for the library API.
//!
//! # Design
//! `LibraryClient` holds only the resolved API root (`{base}/api`) and carries
//! no mutable state between calls. Each endpoint is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The round-trip itself belongs to a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{message_field, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, BookId, CreateBook, CreateLoan, Loan, LoanId};

/// Synchronous, stateless client for the library API.
#[derive(Debug, Clone)]
pub struct LibraryClient {
    api_root: String,
}

impl LibraryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            api_root: format!("{}/api", base_url.trim_end_matches('/')),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    // Books

    pub fn build_list_books(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/books", None)
    }

    pub fn build_get_book(&self, id: BookId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/books/{id}"), None)
    }

    pub fn build_create_book(&self, input: &CreateBook) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Post, "/books", Some(body)))
    }

    pub fn build_update_book(
        &self,
        id: BookId,
        input: &CreateBook,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Put, &format!("/books/{id}"), Some(body)))
    }

    pub fn build_delete_book(&self, id: BookId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/books/{id}"), None)
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // Loans

    pub fn build_list_loans(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/loans", None)
    }

    pub fn build_list_active_loans(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/loans/active", None)
    }

    pub fn build_get_loan(&self, id: LoanId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/loans/{id}"), None)
    }

    pub fn build_create_loan(&self, input: &CreateLoan) -> Result<HttpRequest, ApiError> {
        let body = to_body(input)?;
        Ok(self.request(HttpMethod::Post, "/loans", Some(body)))
    }

    pub fn build_return_loan(&self, id: LoanId) -> HttpRequest {
        self.request(HttpMethod::Put, &format!("/loans/{id}/return"), None)
    }

    pub fn parse_list_loans(&self, response: HttpResponse) -> Result<Vec<Loan>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_loan(&self, response: HttpResponse) -> Result<Loan, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_loan(&self, response: HttpResponse) -> Result<Loan, ApiError> {
        parse_json(response)
    }

    pub fn parse_return_loan(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.api_root),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn to_body<T: Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        400 | 409 | 422 => Err(ApiError::Validation {
            message: message_field(&response.body),
            body: response.body.clone(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_JSON: &str = r#"{"id":1,"title":"Dune","author":"Herbert","isbn":"123","stock":2,"createdAt":"2024-01-15T10:30:00"}"#;
    const LOAN_JSON: &str = r#"{"id":4,"bookId":1,"bookTitle":"Dune","studentName":"Ana","loanDate":"2024-02-01T09:00:00Z","returnDate":null,"status":"Active","createdAt":"2024-02-01T09:00:00Z"}"#;

    fn client() -> LibraryClient {
        LibraryClient::new("http://localhost:5086")
    }

    fn json_header() -> Vec<(String, String)> {
        vec![("content-type".to_string(), "application/json".to_string())]
    }

    #[test]
    fn every_request_is_rooted_at_api() {
        let c = client();
        assert_eq!(c.build_list_books().path, "http://localhost:5086/api/books");
        assert_eq!(c.build_get_book(9).path, "http://localhost:5086/api/books/9");
        assert_eq!(c.build_list_loans().path, "http://localhost:5086/api/loans");
        assert_eq!(
            c.build_list_active_loans().path,
            "http://localhost:5086/api/loans/active"
        );
        assert_eq!(c.build_get_loan(3).path, "http://localhost:5086/api/loans/3");
    }

    #[test]
    fn every_request_carries_json_content_type() {
        let c = client();
        assert_eq!(c.build_list_books().headers, json_header());
        assert_eq!(c.build_delete_book(1).headers, json_header());
        assert_eq!(c.build_return_loan(1).headers, json_header());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = LibraryClient::new("http://localhost:5086/");
        assert_eq!(c.api_root(), "http://localhost:5086/api");
    }

    #[test]
    fn build_create_book_serializes_input() {
        let input = CreateBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "123".to_string(),
            stock: 3,
        };
        let req = client().build_create_book(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5086/api/books");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["stock"], 3);
    }

    #[test]
    fn build_update_book_uses_put_on_item() {
        let req = client().build_update_book(5, &CreateBook::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5086/api/books/5");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_book_has_no_body() {
        let req = client().build_delete_book(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_loan_serializes_camel_case() {
        let input = CreateLoan {
            book_id: 1,
            student_name: "Ana".to_string(),
        };
        let req = client().build_create_loan(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["bookId"], 1);
        assert_eq!(body["studentName"], "Ana");
    }

    #[test]
    fn build_return_loan_is_bodyless_put() {
        let req = client().build_return_loan(4);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5086/api/loans/4/return");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_books_success() {
        let books = client()
            .parse_list_books(HttpResponse::new(200, format!("[{BOOK_JSON}]")))
            .unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn parse_get_book_not_found() {
        let err = client()
            .parse_get_book(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_book_accepts_201() {
        let book = client()
            .parse_create_book(HttpResponse::new(201, BOOK_JSON))
            .unwrap();
        assert_eq!(book.id, 1);
    }

    #[test]
    fn parse_update_book_accepts_no_content_and_ok() {
        assert!(client().parse_update_book(HttpResponse::new(204, "")).is_ok());
        assert!(client().parse_update_book(HttpResponse::new(200, "")).is_ok());
    }

    #[test]
    fn parse_create_loan_zero_stock_is_validation() {
        let err = client()
            .parse_create_loan(HttpResponse::new(
                400,
                r#"{"message":"El libro no tiene stock disponible"}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::Validation { message, .. } => {
                assert_eq!(message.as_deref(), Some("El libro no tiene stock disponible"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_without_json_keeps_raw_body() {
        let err = client()
            .parse_create_loan(HttpResponse::new(400, "Book not found"))
            .unwrap_err();
        match &err {
            ApiError::Validation { message, body } => {
                assert_eq!(message, &None);
                assert_eq!(body, "Book not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.server_message().is_none());
    }

    #[test]
    fn parse_get_loan_success() {
        let loan = client().parse_get_loan(HttpResponse::new(200, LOAN_JSON)).unwrap();
        assert_eq!(loan.book_title, "Dune");
        assert!(loan.is_active());
    }

    #[test]
    fn server_error_is_http_error() {
        let err = client()
            .parse_list_loans(HttpResponse::new(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_loans_bad_json() {
        let err = client()
            .parse_list_loans(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_return_loan_success() {
        assert!(client().parse_return_loan(HttpResponse::new(204, "")).is_ok());
    }
}
