use crate::format::plural;
use crate::http::Transport;
use crate::nav::Route;
use crate::service::Api;
use crate::types::{Book, BookId};

use super::messages::{CONFIRM_DELETE_BOOK, DELETE_BOOK_FAILED, LOAD_BOOKS_FAILED};
use super::table::Table;
use super::{render_banner, ActionOutcome, LoadState, Prompt};

/// Counts shown under the book table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSummary {
    pub total: usize,
    pub available: usize,
    pub out_of_stock: usize,
}

/// The `/books` screen: every book with edit and delete actions.
#[derive(Debug)]
pub struct BookListView {
    books: Vec<Book>,
    state: LoadState,
    banner: Option<String>,
}

impl Default for BookListView {
    fn default() -> Self {
        Self::new()
    }
}

impl BookListView {
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            state: LoadState::Loading,
            banner: None,
        }
    }

    /// Fetch the full list, replacing the current snapshot.
    pub fn load<T: Transport>(&mut self, api: &Api<T>) {
        self.state = LoadState::Loading;
        match api.books().list_all() {
            Ok(books) => {
                self.books = books;
                self.banner = None;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load books");
                self.banner = Some(LOAD_BOOKS_FAILED.to_string());
                self.state = LoadState::Failed;
            }
        }
    }

    /// Delete after confirmation, then re-fetch the whole list.
    pub fn delete<T: Transport>(
        &mut self,
        api: &Api<T>,
        id: BookId,
        prompt: &mut dyn Prompt,
    ) -> ActionOutcome {
        if !self.books.iter().any(|b| b.id == id) {
            return ActionOutcome::Unavailable;
        }
        if !prompt.confirm(CONFIRM_DELETE_BOOK) {
            return ActionOutcome::Cancelled;
        }
        match api.books().delete(id) {
            Ok(()) => {
                tracing::info!(book_id = id, "book deleted");
                self.load(api);
                ActionOutcome::Done
            }
            Err(err) => {
                tracing::warn!(book_id = id, error = %err, "failed to delete book");
                self.banner = Some(DELETE_BOOK_FAILED.to_string());
                ActionOutcome::Failed
            }
        }
    }

    pub fn edit(&self, id: BookId) -> Route {
        Route::EditBook(id)
    }

    pub fn create(&self) -> Route {
        Route::NewBook
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn summary(&self) -> StockSummary {
        let available = self.books.iter().filter(|b| b.stock > 0).count();
        StockSummary {
            total: self.books.len(),
            available,
            out_of_stock: self.books.iter().filter(|b| b.stock == 0).count(),
        }
    }

    pub fn render(&self) -> String {
        if self.state == LoadState::Loading {
            return "Cargando libros...\n".to_string();
        }

        let mut out = String::from("📚 Lista de Libros                [new] + Nuevo Libro\n\n");
        render_banner(&mut out, self.banner());

        let mut table = Table::new(["ID", "Título", "Autor", "ISBN", "Stock", "Acciones"])
            .empty_message("No hay libros registrados");
        for book in &self.books {
            table.push_row(vec![
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.isbn.clone(),
                stock_badge(book.stock),
                format!("[edit {0}] [delete {0}]", book.id),
            ]);
        }
        out.push_str(&table.render());

        let summary = self.summary();
        out.push_str(&format!(
            "\nMostrando {} | Con stock disponible: {} | Sin stock: {}\n",
            plural(summary.total, "libro", "libros"),
            summary.available,
            summary.out_of_stock
        ));
        out
    }
}

fn stock_badge(stock: i32) -> String {
    if stock > 0 {
        let count = usize::try_from(stock).unwrap_or(usize::MAX);
        plural(count, "disponible", "disponibles")
    } else {
        "Sin stock".to_string()
    }
}
