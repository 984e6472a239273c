pub mod schema;
pub mod validation;

pub use schema::{CompletionSchema, SchemaHandle};
pub use validation::{cost_sum_discrepancy, COST_SUM_TOLERANCE};
