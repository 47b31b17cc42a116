use crate::error::ApiError;
use crate::format::format_date;
use crate::http::Transport;
use crate::nav::Route;
use crate::service::Api;
use crate::types::{Loan, LoanId};

use super::messages::{CONFIRM_RETURN_LOAN, LOAD_LOANS_FAILED, RETURN_LOAN_FAILED};
use super::table::Table;
use super::{render_banner, ActionOutcome, LoadState, Prompt};

/// The `/loans` screen: every loan, returned or not.
#[derive(Debug)]
pub struct LoanListView {
    loans: Vec<Loan>,
    state: LoadState,
    banner: Option<String>,
}

impl Default for LoanListView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanListView {
    pub fn new() -> Self {
        Self {
            loans: Vec::new(),
            state: LoadState::Loading,
            banner: None,
        }
    }

    pub fn load<T: Transport>(&mut self, api: &Api<T>) {
        self.state = LoadState::Loading;
        apply_fetch(
            api.loans().list_all(),
            &mut self.loans,
            &mut self.state,
            &mut self.banner,
            LOAD_LOANS_FAILED,
        );
    }

    /// Mark an active loan as returned after confirmation, then re-fetch.
    pub fn return_loan<T: Transport>(
        &mut self,
        api: &Api<T>,
        id: LoanId,
        prompt: &mut dyn Prompt,
    ) -> ActionOutcome {
        let outcome = confirm_and_return(api, &self.loans, id, prompt);
        match outcome {
            ActionOutcome::Done => self.load(api),
            ActionOutcome::Failed => self.banner = Some(RETURN_LOAN_FAILED.to_string()),
            ActionOutcome::Cancelled | ActionOutcome::Unavailable => {}
        }
        outcome
    }

    pub fn view_active(&self) -> Route {
        Route::ActiveLoans
    }

    pub fn new_loan(&self) -> Route {
        Route::NewLoan
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn render(&self) -> String {
        if self.state == LoadState::Loading {
            return "Cargando préstamos...\n".to_string();
        }

        let mut out = String::from(
            "📋 Todos los Préstamos           [active] Ver Activos  [new] + Nuevo Préstamo\n\n",
        );
        render_banner(&mut out, self.banner());

        let mut table = Table::new([
            "ID",
            "Libro",
            "Estudiante",
            "Fecha Préstamo",
            "Fecha Devolución",
            "Estado",
            "Acciones",
        ])
        .empty_message("No hay préstamos registrados");
        for loan in &self.loans {
            let (status, action) = if loan.is_active() {
                ("Activo", format!("[return {}]", loan.id))
            } else {
                ("Devuelto", String::new())
            };
            table.push_row(vec![
                loan.id.to_string(),
                loan.book_title.clone(),
                loan.student_name.clone(),
                format_date(&loan.loan_date),
                loan.return_date
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_else(|| "Pendiente".to_string()),
                status.to_string(),
                action,
            ]);
        }
        out.push_str(&table.render());
        out
    }
}

/// Store a fetched list, or record the failure banner.
pub(super) fn apply_fetch(
    result: Result<Vec<Loan>, ApiError>,
    loans: &mut Vec<Loan>,
    state: &mut LoadState,
    banner: &mut Option<String>,
    failure: &str,
) {
    match result {
        Ok(fetched) => {
            *loans = fetched;
            *banner = None;
            *state = LoadState::Ready;
        }
        Err(err) => {
            tracing::error!(error = %err, "{failure}");
            *banner = Some(failure.to_string());
            *state = LoadState::Failed;
        }
    }
}

/// Shared return flow: only active rows of the snapshot offer the action.
pub(super) fn confirm_and_return<T: Transport>(
    api: &Api<T>,
    loans: &[Loan],
    id: LoanId,
    prompt: &mut dyn Prompt,
) -> ActionOutcome {
    if !loans.iter().any(|loan| loan.id == id && loan.is_active()) {
        return ActionOutcome::Unavailable;
    }
    if !prompt.confirm(CONFIRM_RETURN_LOAN) {
        return ActionOutcome::Cancelled;
    }
    match api.loans().return_loan(id) {
        Ok(()) => {
            tracing::info!(loan_id = id, "loan returned");
            ActionOutcome::Done
        }
        Err(err) => {
            tracing::warn!(loan_id = id, error = %err, "failed to return loan");
            ActionOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{array, loan_json, StubTransport};

    fn yes(_: &str) -> bool {
        true
    }

    fn loaded(transport: &StubTransport) -> (Api<&StubTransport>, LoanListView) {
        let api = Api::new("http://api.test", transport);
        let mut view = LoanListView::new();
        view.load(&api);
        (api, view)
    }

    #[test]
    fn renders_active_and_returned_rows() {
        let transport = StubTransport::new().reply(
            200,
            &array(&[
                loan_json(1, 1, "Active", None),
                loan_json(2, 1, "Returned", Some("2024-03-09T10:00:00Z")),
            ]),
        );
        let (_api, view) = loaded(&transport);
        let rendered = view.render();
        assert!(rendered.contains("Pendiente"));
        assert!(rendered.contains("9/3/2024"));
        assert!(rendered.contains("5/3/2024"));
        assert!(rendered.contains("Activo"));
        assert!(rendered.contains("Devuelto"));
        assert!(rendered.contains("[return 1]"));
        assert!(!rendered.contains("[return 2]"));
    }

    #[test]
    fn return_refetches_all_loans() {
        let transport = StubTransport::new()
            .reply(200, &array(&[loan_json(1, 1, "Active", None)]))
            .reply(204, "")
            .reply(200, &array(&[loan_json(1, 1, "Returned", Some("2024-03-09"))]));
        let (api, mut view) = loaded(&transport);

        assert_eq!(view.return_loan(&api, 1, &mut yes), ActionOutcome::Done);
        assert_eq!(
            transport.paths(),
            vec![
                "GET http://api.test/api/loans",
                "PUT http://api.test/api/loans/1/return",
                "GET http://api.test/api/loans",
            ]
        );
        assert!(!view.loans()[0].is_active());
    }

    #[test]
    fn returned_loan_offers_no_action() {
        let transport = StubTransport::new()
            .reply(200, &array(&[loan_json(2, 1, "Returned", Some("2024-03-09"))]));
        let (api, mut view) = loaded(&transport);
        assert_eq!(view.return_loan(&api, 2, &mut yes), ActionOutcome::Unavailable);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn declined_return_sends_nothing() {
        let transport = StubTransport::new().reply(200, &array(&[loan_json(1, 1, "Active", None)]));
        let (api, mut view) = loaded(&transport);
        let outcome = view.return_loan(&api, 1, &mut |_: &str| false);
        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn failed_return_shows_banner() {
        let transport = StubTransport::new()
            .reply(200, &array(&[loan_json(1, 1, "Active", None)]))
            .reply(400, r#"{"message":"El préstamo ya fue devuelto"}"#);
        let (api, mut view) = loaded(&transport);
        assert_eq!(view.return_loan(&api, 1, &mut yes), ActionOutcome::Failed);
        assert_eq!(view.banner(), Some("Error al devolver el préstamo"));
    }

    #[test]
    fn load_failure_shows_banner() {
        let transport = StubTransport::new().reply(500, "");
        let (_api, view) = loaded(&transport);
        assert_eq!(view.state(), LoadState::Failed);
        assert_eq!(view.banner(), Some("Error al cargar los préstamos"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let transport = StubTransport::new().reply(200, "[]");
        let (_api, view) = loaded(&transport);
        assert!(view.render().contains("No hay préstamos registrados"));
        assert_eq!(view.view_active(), Route::ActiveLoans);
        assert_eq!(view.new_loan(), Route::NewLoan);
    }
}
