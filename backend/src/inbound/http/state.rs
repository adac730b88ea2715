//! Shared HTTP adapter state.
//!
//! Handlers receive [`HttpState`] through `web::Data` and only ever talk to
//! driving ports, so they can be exercised with fixtures or mocks.

use std::sync::Arc;

use crate::domain::ports::{
    ArchiveQuery, EmployeeDirectory, FixtureArchiveQuery, FixtureEmployeeDirectory,
    FixtureInventoryRegister, FixtureLoginService, FixtureOrganisationCatalogue,
    FixtureReportingQuery, FixtureUserAdministration, InventoryRegister, LoginService,
    OrganisationCatalogue, ReportingQuery, UserAdministration,
};

/// Parameter object bundling every driving port.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserAdministration>,
    pub employees: Arc<dyn EmployeeDirectory>,
    pub organisation: Arc<dyn OrganisationCatalogue>,
    pub inventory: Arc<dyn InventoryRegister>,
    pub archive: Arc<dyn ArchiveQuery>,
    pub reporting: Arc<dyn ReportingQuery>,
}

impl HttpStatePorts {
    /// In-memory fixtures for every port.
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            users: Arc::new(FixtureUserAdministration),
            employees: Arc::new(FixtureEmployeeDirectory),
            organisation: Arc::new(FixtureOrganisationCatalogue),
            inventory: Arc::new(FixtureInventoryRegister),
            archive: Arc::new(FixtureArchiveQuery),
            reporting: Arc::new(FixtureReportingQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserAdministration>,
    pub employees: Arc<dyn EmployeeDirectory>,
    pub organisation: Arc<dyn OrganisationCatalogue>,
    pub inventory: Arc<dyn InventoryRegister>,
    pub archive: Arc<dyn ArchiveQuery>,
    pub reporting: Arc<dyn ReportingQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use office_admin::domain::ports::{
    ///     FixtureArchiveQuery, FixtureEmployeeDirectory, FixtureInventoryRegister,
    ///     FixtureLoginService, FixtureOrganisationCatalogue, FixtureReportingQuery,
    ///     FixtureUserAdministration,
    /// };
    /// use office_admin::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     users: Arc::new(FixtureUserAdministration),
    ///     employees: Arc::new(FixtureEmployeeDirectory),
    ///     organisation: Arc::new(FixtureOrganisationCatalogue),
    ///     inventory: Arc::new(FixtureInventoryRegister),
    ///     archive: Arc::new(FixtureArchiveQuery),
    ///     reporting: Arc::new(FixtureReportingQuery),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        Self::from(ports)
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            employees,
            organisation,
            inventory,
            archive,
            reporting,
        } = ports;
        Self {
            login,
            users,
            employees,
            organisation,
            inventory,
            archive,
            reporting,
        }
    }
}
