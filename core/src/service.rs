//! Typed resource services over a `LibraryClient` and a `Transport`.
//!
//! `Api` is the only place a request leaves the core: it logs the method and
//! URL, hands the request to the transport and returns the raw response for
//! the matching `parse_*` call. The services are one-to-one mappings of
//! operations to endpoints with no validation, retry or caching.

use crate::client::LibraryClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Book, BookId, CreateBook, CreateLoan, Loan, LoanId};

/// A client paired with the transport that executes its requests.
#[derive(Debug, Clone)]
pub struct Api<T> {
    client: LibraryClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: LibraryClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &LibraryClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn books(&self) -> BookService<'_, T> {
        BookService { api: self }
    }

    pub fn loans(&self) -> LoanService<'_, T> {
        LoanService { api: self }
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::info!(method = %request.method, url = %request.path, "API request");
        let response = self.transport.send(&request)?;
        tracing::trace!(status = response.status, url = %request.path, "API response");
        Ok(response)
    }
}

/// Book operations: `/books`.
pub struct BookService<'a, T> {
    api: &'a Api<T>,
}

impl<T: Transport> BookService<'_, T> {
    pub fn list_all(&self) -> Result<Vec<Book>, ApiError> {
        let c = &self.api.client;
        c.parse_list_books(self.api.execute(c.build_list_books())?)
    }

    pub fn get_by_id(&self, id: BookId) -> Result<Book, ApiError> {
        let c = &self.api.client;
        c.parse_get_book(self.api.execute(c.build_get_book(id))?)
    }

    pub fn create(&self, input: &CreateBook) -> Result<Book, ApiError> {
        let c = &self.api.client;
        c.parse_create_book(self.api.execute(c.build_create_book(input)?)?)
    }

    pub fn update(&self, id: BookId, input: &CreateBook) -> Result<(), ApiError> {
        let c = &self.api.client;
        c.parse_update_book(self.api.execute(c.build_update_book(id, input)?)?)
    }

    pub fn delete(&self, id: BookId) -> Result<(), ApiError> {
        let c = &self.api.client;
        c.parse_delete_book(self.api.execute(c.build_delete_book(id))?)
    }
}

/// Loan operations: `/loans`.
pub struct LoanService<'a, T> {
    api: &'a Api<T>,
}

impl<T: Transport> LoanService<'_, T> {
    pub fn list_all(&self) -> Result<Vec<Loan>, ApiError> {
        let c = &self.api.client;
        c.parse_list_loans(self.api.execute(c.build_list_loans())?)
    }

    /// Loans still out; the filter runs server-side.
    pub fn list_active(&self) -> Result<Vec<Loan>, ApiError> {
        let c = &self.api.client;
        c.parse_list_loans(self.api.execute(c.build_list_active_loans())?)
    }

    pub fn get_by_id(&self, id: LoanId) -> Result<Loan, ApiError> {
        let c = &self.api.client;
        c.parse_get_loan(self.api.execute(c.build_get_loan(id))?)
    }

    /// Fails with `ApiError::Validation` when the book is missing or has no stock.
    pub fn create(&self, input: &CreateLoan) -> Result<Loan, ApiError> {
        let c = &self.api.client;
        c.parse_create_loan(self.api.execute(c.build_create_loan(input)?)?)
    }

    pub fn return_loan(&self, id: LoanId) -> Result<(), ApiError> {
        let c = &self.api.client;
        c.parse_return_loan(self.api.execute(c.build_return_loan(id))?)
    }
}
