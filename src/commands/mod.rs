use crate::{errors::ServiceError, services::reagent_store::ReagentStore};

pub mod add_reagent_command;

pub use add_reagent_command::{AddReagentCommand, AddReagentResult};

/// Command trait for implementing the Command Pattern
///
/// A command carries everything one user action needs, is validated and executed
/// against the store in a single call, and reports what it changed.
pub trait Command {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command against the session's store
    ///
    /// # Arguments
    /// * `store` - The in-memory reagent store the command mutates
    ///
    /// # Returns
    /// * `Result<Self::Result, ServiceError>` - The result of command execution or an error
    fn execute(&self, store: &mut ReagentStore) -> Result<Self::Result, ServiceError>;
}
