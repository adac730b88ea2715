//! Account profile: the account, its role, and the matching employee sheet.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Asset, EmployeeRecord, Role, UserAccount};

/// Profile view of a user account.
///
/// The employee is matched by email. Accounts without an employee carry
/// `employee: null` and no assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub account: UserAccount,
    pub role: Role,
    pub employee: Option<EmployeeRecord>,
    pub assets: Vec<Asset>,
}

impl AccountProfile {
    /// Build a profile, deriving the role from the account.
    pub fn new(account: UserAccount, employee: Option<EmployeeRecord>, assets: Vec<Asset>) -> Self {
        Self {
            role: account.role(),
            account,
            employee,
            assets,
        }
    }
}
