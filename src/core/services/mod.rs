pub mod category_service;
pub mod filter_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use filter_service::{FilterService, LedgerView, PeriodFilter, ViewRow};
pub use summary_service::{CategoryTotal, MonthlySummaryRow, SummaryService, Totals};
pub use transaction_service::{
    EditState, ExpenseForm, IncomeForm, Submission, TransactionService, FALLBACK_CATEGORY,
};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;
