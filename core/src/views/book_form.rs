use crate::format::parse_leading_int;
use crate::http::Transport;
use crate::nav::Route;
use crate::service::Api;
use crate::types::{BookId, CreateBook};

use super::messages::{LOAD_BOOK_FAILED, NEGATIVE_STOCK, REQUIRED_FIELDS, SAVE_BOOK_FAILED};
use super::{render_banner, LoadState, SubmitState};

/// Whether the form creates a new book or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BookId),
}

/// Editable fields of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Isbn,
    Stock,
}

impl BookField {
    /// Accepts the English field names and the Spanish labels.
    pub fn parse(name: &str) -> Option<BookField> {
        match name.to_lowercase().as_str() {
            "title" | "titulo" | "título" => Some(BookField::Title),
            "author" | "autor" => Some(BookField::Author),
            "isbn" => Some(BookField::Isbn),
            "stock" => Some(BookField::Stock),
            _ => None,
        }
    }
}

/// The `/books/new` and `/books/edit/{id}` screen.
#[derive(Debug)]
pub struct BookForm {
    mode: FormMode,
    input: CreateBook,
    load_state: LoadState,
    submit_state: SubmitState,
    banner: Option<String>,
}

impl BookForm {
    pub fn new(mode: FormMode) -> Self {
        let load_state = match mode {
            FormMode::Create => LoadState::Ready,
            FormMode::Edit(_) => LoadState::Loading,
        };
        Self {
            mode,
            input: CreateBook::default(),
            load_state,
            submit_state: SubmitState::Idle,
            banner: None,
        }
    }

    /// In edit mode, fetch the book and pre-fill the fields.
    pub fn load<T: Transport>(&mut self, api: &Api<T>) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        self.load_state = LoadState::Loading;
        match api.books().get_by_id(id) {
            Ok(book) => {
                self.input = CreateBook::from(&book);
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!(book_id = id, error = %err, "failed to load book");
                self.banner = Some(LOAD_BOOK_FAILED.to_string());
                self.load_state = LoadState::Failed;
            }
        }
    }

    pub fn set(&mut self, field: BookField, value: &str) {
        match field {
            BookField::Title => self.input.title = value.to_string(),
            BookField::Author => self.input.author = value.to_string(),
            BookField::Isbn => self.input.isbn = value.to_string(),
            BookField::Stock => {
                let stock = parse_leading_int(value);
                self.input.stock = i32::try_from(stock)
                    .unwrap_or(if stock < 0 { i32::MIN } else { i32::MAX });
            }
        }
    }

    /// Client-side checks run before any request is sent.
    pub fn validate(&self) -> Result<(), &'static str> {
        let input = &self.input;
        if input.title.trim().is_empty()
            || input.author.trim().is_empty()
            || input.isbn.trim().is_empty()
        {
            return Err(REQUIRED_FIELDS);
        }
        if input.stock < 0 {
            return Err(NEGATIVE_STOCK);
        }
        Ok(())
    }

    /// Validate and save. Returns the route to navigate to on success; on
    /// failure the banner is set and the entered data is kept.
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
        let result = match self.mode {
            FormMode::Create => api.books().create(&self.input).map(|book| {
                tracing::info!(book_id = book.id, "book created");
            }),
            FormMode::Edit(id) => api.books().update(id, &self.input).map(|()| {
                tracing::info!(book_id = id, "book updated");
            }),
        };
        self.submit_state = SubmitState::Idle;

        match result {
            Ok(()) => Some(Route::Books),
            Err(err) => {
                tracing::warn!(error = %err, "failed to save book");
                self.banner = Some(
                    err.server_message()
                        .unwrap_or_else(|| SAVE_BOOK_FAILED.to_string()),
                );
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::Books
    }

    /// Submit is disabled while loading or while a save is in flight.
    pub fn can_submit(&self) -> bool {
        self.submit_state == SubmitState::Idle && self.load_state != LoadState::Loading
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn input(&self) -> &CreateBook {
        &self.input
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn render(&self) -> String {
        if self.load_state == LoadState::Loading {
            return "Cargando libro...\n".to_string();
        }
        let (header, action) = match self.mode {
            FormMode::Create => ("➕ Nuevo Libro", "Guardar"),
            FormMode::Edit(_) => ("✏️ Editar Libro", "Actualizar"),
        };

        let mut out = format!("{header}\n\n");
        render_banner(&mut out, self.banner());
        out.push_str(&format!("  Título *          : {}\n", self.input.title));
        out.push_str(&format!("  Autor *           : {}\n", self.input.author));
        out.push_str(&format!("  ISBN *            : {}\n", self.input.isbn));
        out.push_str(&format!("  Stock Disponible  : {}\n", self.input.stock));
        out.push_str("    Cantidad de ejemplares disponibles para préstamo\n\n");
        out.push_str(&format!("[cancel] Cancelar    [save] {action}\n"));
        out
    }
}
