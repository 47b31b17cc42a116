//! Line-oriented navigation shell.
//!
//! # Design
//! The shell keeps exactly one mounted `Screen`. Navigating builds the new
//! view, loads it (one request, two for a form that pre-fills) and drops the
//! previous one with its snapshot. Each input line is one user action; the
//! current screen is re-rendered after every action. No error ends the loop:
//! service failures surface as banners inside the views and unknown commands
//! print a hint.

use std::io::{self, BufRead, Write};

use library_core::nav::render_navbar;
use library_core::views::{
    ActionOutcome, ActiveLoansView, BookField, BookForm, BookListView, FormMode, LoanForm,
    LoanListView, Prompt,
};
use library_core::{Api, BookId, LoanId, Route, Transport};

const HELP: &str = "\
Navegación:
  libros | prestamos | activos   enlaces de la barra
  go <ruta>                      /books, /books/new, /books/edit/<id>, /loans, /loans/new, /loans/active
  reload                         volver a cargar la vista
  help | quit
Listas:
  new | edit <id> | delete <id> | return <id> | active | all
Formularios:
  set <title|author|isbn|stock> <valor>   (libro)
  book <id> | student <nombre>            (préstamo)
  save | cancel
";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    New,
    Edit(BookId),
    Delete(BookId),
    Return(LoanId),
    ViewActive,
    ViewAll,
    Set(BookField, String),
    SelectBook(String),
    Student(String),
    Save,
    Cancel,
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let command = match verb.to_lowercase().as_str() {
            "libros" | "books" => Command::Go(Route::Books),
            "prestamos" | "préstamos" | "loans" => Command::Go(Route::Loans),
            "activos" => Command::Go(Route::ActiveLoans),
            "go" => Command::Go(
                Route::parse(rest).ok_or_else(|| format!("Ruta desconocida: {rest}"))?,
            ),
            "new" | "nuevo" => Command::New,
            "edit" => Command::Edit(parse_id(rest)?),
            "delete" => Command::Delete(parse_id(rest)?),
            "return" => Command::Return(parse_id(rest)?),
            "active" => Command::ViewActive,
            "all" => Command::ViewAll,
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field =
                    BookField::parse(name).ok_or_else(|| format!("Campo desconocido: {name}"))?;
                Command::Set(field, value.trim().to_string())
            }
            "book" | "libro" => Command::SelectBook(rest.to_string()),
            "student" | "estudiante" => Command::Student(rest.to_string()),
            "save" | "guardar" => Command::Save,
            "cancel" | "cancelar" => Command::Cancel,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "salir" => Command::Quit,
            "" => return Err(String::new()),
            other => return Err(format!("Comando desconocido: {other} (escriba 'help')")),
        };
        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("Identificador inválido: {raw}"))
}

/// The currently mounted view.
#[derive(Debug)]
pub enum Screen {
    Books(BookListView),
    BookForm(BookForm),
    Loans(LoanListView),
    ActiveLoans(ActiveLoansView),
    LoanForm(LoanForm),
}

impl Screen {
    /// Build the view for `route` and run its on-mount fetch.
    pub fn mount<T: Transport>(route: Route, api: &Api<T>) -> Screen {
        match route {
            Route::Books => {
                let mut view = BookListView::new();
                view.load(api);
                Screen::Books(view)
            }
            Route::NewBook => Screen::book_form(FormMode::Create, api),
            Route::EditBook(id) => Screen::book_form(FormMode::Edit(id), api),
            Route::Loans => {
                let mut view = LoanListView::new();
                view.load(api);
                Screen::Loans(view)
            }
            Route::ActiveLoans => {
                let mut view = ActiveLoansView::new();
                view.load(api);
                Screen::ActiveLoans(view)
            }
            Route::NewLoan => {
                let mut form = LoanForm::new();
                form.load(api);
                Screen::LoanForm(form)
            }
        }
    }

    fn book_form<T: Transport>(mode: FormMode, api: &Api<T>) -> Screen {
        let mut form = BookForm::new(mode);
        form.load(api);
        Screen::BookForm(form)
    }

    pub fn render(&self) -> String {
        match self {
            Screen::Books(view) => view.render(),
            Screen::BookForm(form) => form.render(),
            Screen::Loans(view) => view.render(),
            Screen::ActiveLoans(view) => view.render(),
            Screen::LoanForm(form) => form.render(),
        }
    }
}

/// Reads a yes/no answer from the shell's input.
struct LinePrompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<'_, R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{question} [s/N]: ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

pub struct Shell<T, R, W> {
    api: Api<T>,
    input: R,
    output: W,
    route: Route,
    screen: Screen,
}

impl<T: Transport, R: BufRead, W: Write> Shell<T, R, W> {
    /// Create a shell and mount `start`.
    pub fn new(api: Api<T>, start: Route, input: R, output: W) -> Self {
        let screen = Screen::mount(start, &api);
        Self {
            api,
            input,
            output,
            route: start,
            screen,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::info!(%route, "navigate");
        self.screen = Screen::mount(route, &self.api);
        self.route = route;
    }

    pub fn render(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", render_navbar(self.route))?;
        writeln!(self.output, "{}", "=".repeat(60))?;
        write!(self.output, "{}", self.screen.render())?;
        writeln!(self.output)?;
        self.output.flush()
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.render()?;
        loop {
            write!(self.output, "{}> ", self.route)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(Command::Help) => write!(self.output, "{HELP}")?,
                Ok(command) => {
                    self.apply(command)?;
                    self.render()?;
                }
                Err(message) if message.is_empty() => {}
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    /// Apply one command to the mounted screen.
    pub fn apply(&mut self, command: Command) -> io::Result<()> {
        let api = &self.api;
        let mut prompt = LinePrompt {
            input: &mut self.input,
            output: &mut self.output,
        };

        let next = match (&mut self.screen, command) {
            (_, Command::Go(route)) => Some(route),
            (_, Command::Reload) => Some(self.route),

            (Screen::Books(view), Command::New) => Some(view.create()),
            (Screen::Books(view), Command::Edit(id)) => Some(view.edit(id)),
            (Screen::Books(view), Command::Delete(id)) => {
                let outcome = view.delete(api, id, &mut prompt);
                report(prompt.output, outcome, "libro", id)?;
                None
            }

            (Screen::Loans(view), Command::New) => Some(view.new_loan()),
            (Screen::Loans(view), Command::ViewActive) => Some(view.view_active()),
            (Screen::Loans(view), Command::Return(id)) => {
                let outcome = view.return_loan(api, id, &mut prompt);
                report(prompt.output, outcome, "préstamo activo", id)?;
                None
            }

            (Screen::ActiveLoans(view), Command::New) => Some(view.new_loan()),
            (Screen::ActiveLoans(view), Command::ViewAll) => Some(view.view_all()),
            (Screen::ActiveLoans(view), Command::Return(id)) => {
                let outcome = view.return_loan(api, id, &mut prompt);
                report(prompt.output, outcome, "préstamo activo", id)?;
                None
            }

            (Screen::BookForm(form), Command::Set(field, value)) => {
                form.set(field, &value);
                None
            }
            (Screen::BookForm(form), Command::Save) => form.submit(api),
            (Screen::BookForm(form), Command::Cancel) => Some(form.cancel()),

            (Screen::LoanForm(form), Command::SelectBook(raw)) => {
                form.select_book(&raw);
                None
            }
            (Screen::LoanForm(form), Command::Student(name)) => {
                form.set_student_name(&name);
                None
            }
            (Screen::LoanForm(form), Command::Save) => form.submit(api),
            (Screen::LoanForm(form), Command::Cancel) => Some(form.cancel()),

            (_, command) => {
                writeln!(prompt.output, "Acción no disponible en esta vista: {command:?}")?;
                None
            }
        };

        if let Some(route) = next {
            self.navigate(route);
        }
        Ok(())
    }
}

fn report<W: Write>(out: &mut W, outcome: ActionOutcome, what: &str, id: i64) -> io::Result<()> {
    match outcome {
        ActionOutcome::Unavailable => writeln!(out, "No hay ningún {what} con id {id} en la lista"),
        ActionOutcome::Cancelled => writeln!(out, "Operación cancelada"),
        ActionOutcome::Done | ActionOutcome::Failed => Ok(()),
    }
}
