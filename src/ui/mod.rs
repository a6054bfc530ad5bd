//! View models for the reagents page: the table, the add panel and the
//! session state that ties them together.

pub mod panel;
pub mod session;
pub mod table;

pub use panel::AddReagentPanel;
pub use session::{EventOutcome, InventorySession, UiEvent};
pub use table::{ReagentRow, ReagentTable, TableSummary, COLUMNS};
