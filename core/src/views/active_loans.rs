use crate::format::format_date;
use crate::http::Transport;
use crate::nav::Route;
use crate::service::Api;
use crate::types::{Loan, LoanId};

use super::loan_list::{apply_fetch, confirm_and_return};
use super::messages::{LOAD_ACTIVE_LOANS_FAILED, RETURN_LOAN_FAILED};
use super::table::Table;
use super::{render_banner, ActionOutcome, LoadState, Prompt};

/// The `/loans/active` screen: loans still out, each with a return action.
#[derive(Debug)]
pub struct ActiveLoansView {
    loans: Vec<Loan>,
    state: LoadState,
    banner: Option<String>,
}

impl Default for ActiveLoansView {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveLoansView {
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
            api.loans().list_active(),
            &mut self.loans,
            &mut self.state,
            &mut self.banner,
            LOAD_ACTIVE_LOANS_FAILED,
        );
    }

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

    pub fn view_all(&self) -> Route {
        Route::Loans
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
            return "Cargando préstamos activos...\n".to_string();
        }

        let mut out = String::from(
            "📋 Préstamos Activos             [all] Ver Todos  [new] + Nuevo Préstamo\n\n",
        );
        render_banner(&mut out, self.banner());

        if self.loans.is_empty() {
            out.push_str("No hay préstamos activos en este momento.\n");
            return out;
        }

        let mut table = Table::new(["ID", "Libro", "Estudiante", "Fecha Préstamo", "Estado", "Acción"]);
        for loan in &self.loans {
            table.push_row(vec![
                loan.id.to_string(),
                loan.book_title.clone(),
                loan.student_name.clone(),
                format_date(&loan.loan_date),
                "Activo".to_string(),
                format!("[return {}]", loan.id),
            ]);
        }
        out.push_str(&table.render());
        out
    }
}
