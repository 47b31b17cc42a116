//! View models for each screen.
//!
//! # Design
//! A view owns the snapshot it fetched and nothing else; dropping the view
//! on navigation discards it. Every service failure is caught here, logged,
//! and turned into a Spanish banner so the view stays usable. Views render
//! themselves as text and report navigation by returning a `Route`.
//!
//! Actions that need the user's consent take a `Prompt`, which the shell
//! backs with stdin and tests back with a closure.

mod active_loans;
mod book_form;
mod book_list;
mod loan_form;
mod loan_list;
pub mod table;

pub use active_loans::ActiveLoansView;
pub use book_form::{BookField, BookForm, FormMode};
pub use book_list::{BookListView, StockSummary};
pub use loan_form::LoanForm;
pub use loan_list::LoanListView;

/// Loading lifecycle of a list or form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// Submission lifecycle of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Result of a row action such as delete or return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the action and the list was re-fetched.
    Done,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The server rejected the action; a banner is shown.
    Failed,
    /// The id does not name a row offering this action.
    Unavailable,
}

/// Asks the user a yes/no question.
pub trait Prompt {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Prompt for F {
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Text of a banner line, or nothing.
pub(crate) fn render_banner(out: &mut String, banner: Option<&str>) {
    if let Some(message) = banner {
        out.push_str(&format!("[!] {message}\n\n"));
    }
}

pub(crate) mod messages {
    pub const REQUIRED_FIELDS: &str = "Todos los campos son requeridos";
    pub const NEGATIVE_STOCK: &str = "El stock no puede ser negativo";

    pub const LOAD_BOOKS_FAILED: &str = "Error al cargar los libros";
    pub const LOAD_BOOK_FAILED: &str = "Error al cargar el libro";
    pub const DELETE_BOOK_FAILED: &str = "Error al eliminar el libro";
    pub const SAVE_BOOK_FAILED: &str = "Error al guardar el libro";
    pub const CONFIRM_DELETE_BOOK: &str = "¿Estás seguro de eliminar este libro?";

    pub const LOAD_LOANS_FAILED: &str = "Error al cargar los préstamos";
    pub const LOAD_ACTIVE_LOANS_FAILED: &str = "Error al cargar los préstamos activos";
    pub const RETURN_LOAN_FAILED: &str = "Error al devolver el préstamo";
    pub const CREATE_LOAN_FAILED: &str = "Error al registrar el préstamo";
    pub const CONFIRM_RETURN_LOAN: &str = "¿Marcar este préstamo como devuelto?";
}
