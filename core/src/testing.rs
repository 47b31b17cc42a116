//! Scripted in-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Replies with scripted responses in order and records every request.
#[derive(Default)]
pub(crate) struct StubTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, String>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, reason: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(reason.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request.clone());
        match self.replies.borrow_mut().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(ApiError::Transport(reason)),
            None => Err(ApiError::Transport("no scripted reply".to_string())),
        }
    }
}

pub(crate) fn book_json(id: i64, title: &str, stock: i32) -> String {
    format!(
        r#"{{"id":{id},"title":"{title}","author":"Autor {id}","isbn":"isbn-{id}","stock":{stock},"createdAt":"2024-01-15T10:30:00"}}"#
    )
}

pub(crate) fn loan_json(id: i64, book_id: i64, status: &str, return_date: Option<&str>) -> String {
    let return_date = match return_date {
        Some(date) => format!(r#""{date}""#),
        None => "null".to_string(),
    };
    format!(
        r#"{{"id":{id},"bookId":{book_id},"bookTitle":"Libro {book_id}","studentName":"Estudiante {id}","loanDate":"2024-03-05T12:00:00Z","returnDate":{return_date},"status":"{status}","createdAt":"2024-03-05T12:00:00Z"}}"#
    )
}

pub(crate) fn array(items: &[String]) -> String {
    format!("[{}]", items.join(","))
}
