//! Port abstraction for employee persistence.
use async_trait::async_trait;

use crate::domain::{EmployeeChanges, EmployeeId, EmployeeRecord, NewEmployee};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository adapters.
    pub enum EmployeePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "employee repository query failed: {message}",
        /// A unique email constraint rejected the write.
        DuplicateEmail { message: String } => "employee email already registered: {message}",
    }
}

/// Reads and transactional writes over employees and their other info.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Every employee with labels, ordered by id.
    async fn list(&self) -> Result<Vec<EmployeeRecord>, EmployeePersistenceError>;

    /// One employee with labels.
    async fn find(&self, id: EmployeeId)
    -> Result<Option<EmployeeRecord>, EmployeePersistenceError>;

    /// The employee sharing an account's email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmployeeRecord>, EmployeePersistenceError>;

    /// Whether an employee row exists.
    async fn exists(&self, id: EmployeeId) -> Result<bool, EmployeePersistenceError>;

    /// Whether another employee (not `except`) already uses `email`.
    async fn email_taken(
        &self,
        email: &str,
        except: Option<EmployeeId>,
    ) -> Result<bool, EmployeePersistenceError>;

    /// Create the account, the employee, and its other info in one
    /// transaction.
    async fn create(&self, employee: &NewEmployee) -> Result<EmployeeId, EmployeePersistenceError>;

    /// Update the employee, upsert its other info, and apply the account
    /// changes in one transaction. `false` when the employee is missing.
    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, EmployeePersistenceError>;

    /// Delete an employee; `false` when it did not exist.
    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeePersistenceError>;
}
