pub mod aggregates;
pub mod export;
pub mod format;
pub mod packing;

pub use aggregates::{
    budget_variance, category_shares, daily_average, BudgetOverview, BudgetVariance,
    CategoryShare,
};
pub use export::{
    expense_rows, line_item_totals, to_csv_string, to_rows, write_csv, write_expense_csv,
    ExpenseCategory, ExpenseRow, ExportRow, RowKind, EXPORT_COLUMNS,
};
pub use format::{currency_symbol, format_currency};
pub use packing::{packing_list, seasonal_advice, PackingList, SeasonalAdvice};
