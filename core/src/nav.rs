//! Route table and navigation bar.

use std::fmt;

use crate::types::BookId;

pub const BRAND: &str = "📚 Biblioteca Universitaria";

/// Every screen the front-end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Books,
    NewBook,
    EditBook(BookId),
    Loans,
    NewLoan,
    ActiveLoans,
}

/// Links shown in the navigation bar, in display order.
pub const NAV_LINKS: [(&str, Route); 3] = [
    ("Libros", Route::Books),
    ("Préstamos", Route::Loans),
    ("Préstamos Activos", Route::ActiveLoans),
];

impl Route {
    /// Resolve a path. `/` is an alias of `/books`; a trailing slash is ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        if !path.starts_with('/') {
            return None;
        }
        match segments.as_slice() {
            [] | ["books"] => Some(Route::Books),
            ["books", "new"] => Some(Route::NewBook),
            ["books", "edit", id] => id.parse().ok().map(Route::EditBook),
            ["loans"] => Some(Route::Loans),
            ["loans", "new"] => Some(Route::NewLoan),
            ["loans", "active"] => Some(Route::ActiveLoans),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Books => "/books".to_string(),
            Route::NewBook => "/books/new".to_string(),
            Route::EditBook(id) => format!("/books/edit/{id}"),
            Route::Loans => "/loans".to_string(),
            Route::NewLoan => "/loans/new".to_string(),
            Route::ActiveLoans => "/loans/active".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One-line navigation bar; the link for `current` is bracketed.
pub fn render_navbar(current: Route) -> String {
    let section = match current {
        Route::Books | Route::NewBook | Route::EditBook(_) => Route::Books,
        Route::Loans | Route::NewLoan => Route::Loans,
        Route::ActiveLoans => Route::ActiveLoans,
    };
    let links: Vec<String> = NAV_LINKS
        .iter()
        .map(|(label, route)| {
            if *route == section {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect();
    format!("{BRAND} | {}", links.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_books_resolve_to_book_list() {
        assert_eq!(Route::parse("/"), Some(Route::Books));
        assert_eq!(Route::parse("/books"), Some(Route::Books));
        assert_eq!(Route::parse("/books/"), Some(Route::Books));
    }

    #[test]
    fn parses_every_route() {
        assert_eq!(Route::parse("/books/new"), Some(Route::NewBook));
        assert_eq!(Route::parse("/books/edit/12"), Some(Route::EditBook(12)));
        assert_eq!(Route::parse("/loans"), Some(Route::Loans));
        assert_eq!(Route::parse("/loans/new"), Some(Route::NewLoan));
        assert_eq!(Route::parse("/loans/active"), Some(Route::ActiveLoans));
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse("/books/edit/abc"), None);
        assert_eq!(Route::parse("/patrons"), None);
        assert_eq!(Route::parse("books"), None);
    }

    #[test]
    fn path_round_trips_through_parse() {
        for route in [
            Route::Books,
            Route::NewBook,
            Route::EditBook(3),
            Route::Loans,
            Route::NewLoan,
            Route::ActiveLoans,
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn navbar_highlights_section() {
        let bar = render_navbar(Route::EditBook(1));
        assert!(bar.starts_with(BRAND));
        assert!(bar.contains("[Libros]"));
        assert!(bar.contains(" Préstamos Activos "));
    }
}
