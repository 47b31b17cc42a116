use crate::format::parse_leading_int;
use crate::http::Transport;
use crate::nav::Route;
use crate::service::Api;
use crate::types::{Book, BookId, CreateLoan};

use super::messages::{CREATE_LOAN_FAILED, LOAD_BOOKS_FAILED, REQUIRED_FIELDS};
use super::{render_banner, LoadState, SubmitState};

/// The `/loans/new` screen.
///
/// Only books with stock are offered. A stock-related rejection from the
/// server triggers a re-fetch so the selection reflects current availability.
#[derive(Debug)]
pub struct LoanForm {
    books: Vec<Book>,
    input: CreateLoan,
    load_state: LoadState,
    submit_state: SubmitState,
    banner: Option<String>,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanForm {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            input: CreateLoan::default(),
            load_state: LoadState::Loading,
            submit_state: SubmitState::Idle,
            banner: None,
        }
    }

    /// Fetch all books and keep the ones that can be lent. The selection
    /// moves to the first available book; the banner is left untouched.
    pub fn load<T: Transport>(&mut self, api: &Api<T>) {
        self.load_state = LoadState::Loading;
        match api.books().list_all() {
            Ok(books) => {
                self.books = books.into_iter().filter(Book::is_available).collect();
                self.input.book_id = self.books.first().map_or(0, |book| book.id);
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load books for loan form");
                self.books.clear();
                self.input.book_id = 0;
                self.banner = Some(LOAD_BOOKS_FAILED.to_string());
                self.load_state = LoadState::Failed;
            }
        }
    }

    /// Select a book from raw input; unparsable input clears the selection.
    pub fn select_book(&mut self, raw: &str) {
        self.select_book_id(parse_leading_int(raw));
    }

    /// Only offered books can be selected; any other id clears the selection.
    pub fn select_book_id(&mut self, id: BookId) {
        self.input.book_id = if self.books.iter().any(|book| book.id == id) {
            id
        } else {
            0
        };
    }

    pub fn set_student_name(&mut self, name: &str) {
        self.input.student_name = name.to_string();
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.input.book_id == 0 || self.input.student_name.trim().is_empty() {
            return Err(REQUIRED_FIELDS);
        }
        Ok(())
    }

    /// Register the loan. Returns the route to navigate to on success.
    pub fn submit<T: Transport>(&mut self, api: &Api<T>) -> Option<Route> {
        if !self.can_submit() {
            return None;
        }
        if let Err(message) = self.validate() {
            self.banner = Some(message.to_string());
            return None;
        }

        self.submit_state = SubmitState::Submitting;
        self.banner = None;
        let result = api.loans().create(&self.input);
        self.submit_state = SubmitState::Idle;

        match result {
            Ok(loan) => {
                tracing::info!(loan_id = loan.id, book_id = loan.book_id, "loan registered");
                Some(Route::Loans)
            }
            Err(err) => {
                tracing::warn!(book_id = self.input.book_id, error = %err, "failed to register loan");
                let message = err
                    .server_message()
                    .unwrap_or_else(|| CREATE_LOAN_FAILED.to_string());
                let stock_related = message.to_lowercase().contains("stock");
                self.banner = Some(message);
                if stock_related {
                    self.load(api);
                }
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Loans
    }

    pub fn can_submit(&self) -> bool {
        self.submit_state == SubmitState::Idle && self.load_state != LoadState::Loading
    }

    /// Books offered in the selection list; all have stock > 0.
    pub fn available_books(&self) -> &[Book] {
        &self.books
    }

    pub fn input(&self) -> &CreateLoan {
        &self.input
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn render(&self) -> String {
        if self.load_state == LoadState::Loading {
            return "Cargando libros disponibles...\n".to_string();
        }

        let mut out = String::from("➕ Nuevo Préstamo\n\n");
        render_banner(&mut out, self.banner());

        if self.books.is_empty() {
            out.push_str(
                "No hay libros disponibles para préstamo. Todos los libros tienen stock 0.\n",
            );
            return out;
        }

        out.push_str("  Libro *\n");
        for book in &self.books {
            let marker = if book.id == self.input.book_id { "(x)" } else { "( )" };
            out.push_str(&format!(
                "    {marker} {} - {} - {} (Stock: {})\n",
                book.id, book.title, book.author, book.stock
            ));
        }
        out.push_str("    Solo se muestran libros con stock disponible\n");
        out.push_str(&format!(
            "  Nombre del Estudiante * : {}\n\n",
            self.input.student_name
        ));
        out.push_str("[cancel] Cancelar    [save] Registrar Préstamo\n");
        out
    }
}
