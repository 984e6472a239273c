pub mod planner;
pub mod session;

pub use planner::TripPlanner;
pub use session::{PlanState, TripSession};
