//! spendlens-core: transaction records and the search-bar query engine

pub mod transaction;
pub mod token;
pub mod lexer;
pub mod matcher;
pub mod query;
pub mod range;
pub mod summary;
pub mod analytics;

pub use transaction::{Transaction, Searchable, DEFAULT_CATEGORY};
pub use token::{Operator, SearchToken};
pub use lexer::parse_query;
pub use matcher::{Field, Predicate, StrField, token_matches};
pub use query::{Query, filter_transactions};
pub use range::{TransactionFilter, ALL_CATEGORIES};
pub use summary::{GroupBy, SpendingRow, summarize, total_spent};
pub use analytics::{
    BudgetLine, BudgetState, Period, PeriodTotal, SpendingComparison, Verdict, budget_status,
    compare_spending,
};
