//! Synchronous client core for the university library administration API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` supplied by the
//! host executes each round-trip. On top of that sit the typed resource
//! services and the view models the front-end renders.
//!
//! # Design
//! - `LibraryClient` is stateless: it holds only the API root.
//! - Each endpoint is split into `build_*` and `parse_*`, so the I/O boundary
//!   is explicit.
//! - `Api` pairs the client with a transport and logs every request.
//! - Views own their fetched snapshot; nothing is cached across views.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod nav;
pub mod service;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

pub use client::LibraryClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use nav::Route;
pub use service::{Api, BookService, LoanService};
pub use types::{Book, BookId, CreateBook, CreateLoan, Loan, LoanId, LoanStatus};
