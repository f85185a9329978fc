//! Record builders shared by the store integration suites.

use mockable::DefaultClock;
use task_tracker::{
    employee::domain::{EmailAddress, Employee, EmployeeProfile, PersonName},
    task::domain::{Task, TaskDraft, TaskName},
};

/// Boxed error used by fallible test helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Builds an unsaved employee with the given email.
///
/// # Errors
///
/// Returns an error if the email is not a valid address.
pub fn employee(email: &str) -> Result<Employee, BoxError> {
    let profile = EmployeeProfile::new(
        EmailAddress::new(email)?,
        PersonName::new("last_name", "Orlova")?,
        PersonName::new("first_name", "Irina")?,
    )
    .with_post("analyst");
    Ok(Employee::new(profile, &DefaultClock))
}

/// Builds an unsaved task from a draft customised by `shape`.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn task(name: &str, shape: impl FnOnce(TaskDraft) -> TaskDraft) -> Result<Task, BoxError> {
    let draft = TaskDraft::new(TaskName::new(name)?, format!("{name} details"));
    Ok(Task::new(shape(draft), &DefaultClock))
}

/// Builds an unsaved task with no parent, assignee, or deadline.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn plain_task(name: &str) -> Result<Task, BoxError> {
    task(name, |draft| draft)
}
