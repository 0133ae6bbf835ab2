//! Task submission model.

/// One task submission, as received from the form or command line.
///
/// `due_date` stays a raw string: formatting is cosmetic and an
/// unparseable date must not fail the job.
#[derive(Debug, Clone, Default)]
pub struct TaskTicket {
    pub name: String,
    pub assignee: Option<String>,
    pub details: Option<String>,
    pub due_date: String,
}
