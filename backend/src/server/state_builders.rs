//! Builders wiring repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use crate::domain::ports::{
    ArchiveRepository, AssetRepository, EmployeeRepository, OrganisationRepository,
    PasswordHasher, ReportingRepository, UserRepository,
};
use crate::domain::{
    AccountService, ArchiveQueryService, EmployeeService, EmployeeServiceDeps, InventoryService,
    OrganisationService, ReportingService,
};
use crate::inbound::http::health::ReadinessCheck;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::password::BcryptPasswordHasher;
use crate::outbound::persistence::{
    DbPool, DieselArchiveRepository, DieselAssetRepository, DieselEmployeeRepository,
    DieselOrganisationRepository, DieselReportingRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Driven ports shared by the domain services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub organisation: Arc<dyn OrganisationRepository>,
    pub assets: Arc<dyn AssetRepository>,
    pub archive: Arc<dyn ArchiveRepository>,
    pub reporting: Arc<dyn ReportingRepository>,
}

impl Repositories {
    /// Diesel adapters over one pool.
    pub fn from_pool(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            employees: Arc::new(DieselEmployeeRepository::new(pool.clone())),
            organisation: Arc::new(DieselOrganisationRepository::new(pool.clone())),
            assets: Arc::new(DieselAssetRepository::new(pool.clone())),
            archive: Arc::new(DieselArchiveRepository::new(pool.clone())),
            reporting: Arc::new(DieselReportingRepository::new(pool.clone())),
        }
    }

    /// Account service over these repositories, also used for the startup
    /// administrator.
    pub fn account_service(&self, hasher: Arc<dyn PasswordHasher>) -> AccountService {
        AccountService::new(
            Arc::clone(&self.users),
            Arc::clone(&self.employees),
            Arc::clone(&self.assets),
            hasher,
        )
    }
}

/// Build every driving port from `repos`.
pub fn service_ports(
    repos: &Repositories,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts {
    let accounts = Arc::new(repos.account_service(Arc::clone(&hasher)));
    let employees = EmployeeService::new(
        EmployeeServiceDeps {
            employees: Arc::clone(&repos.employees),
            users: Arc::clone(&repos.users),
            organisation: Arc::clone(&repos.organisation),
            assets: Arc::clone(&repos.assets),
            archive: Arc::clone(&repos.archive),
            hasher,
        },
        Arc::clone(&clock),
    );
    HttpStatePorts {
        login: accounts.clone(),
        users: accounts,
        employees: Arc::new(employees),
        organisation: Arc::new(OrganisationService::new(
            Arc::clone(&repos.organisation),
            Arc::clone(&repos.archive),
            Arc::clone(&clock),
        )),
        inventory: Arc::new(InventoryService::new(
            Arc::clone(&repos.assets),
            Arc::clone(&repos.employees),
            Arc::clone(&repos.archive),
            Arc::clone(&clock),
        )),
        archive: Arc::new(ArchiveQueryService::new(Arc::clone(&repos.archive))),
        reporting: Arc::new(ReportingService::new(Arc::clone(&repos.reporting), clock)),
    }
}

/// Build HTTP state from `config`: database-backed when a pool is
/// attached, fixtures otherwise.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => service_ports(
            &Repositories::from_pool(pool),
            Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost)),
            Arc::new(DefaultClock),
        ),
        None => {
            warn!("no database configured; serving fixture data");
            HttpStatePorts::fixtures()
        }
    };
    web::Data::new(HttpState::new(ports))
}

/// Readiness check that pings the database.
#[derive(Clone)]
pub struct DatabaseReadiness {
    pool: DbPool,
}

impl DatabaseReadiness {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadinessCheck for DatabaseReadiness {
    async fn check(&self) -> Result<(), String> {
        self.pool.ping().await.map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for port wiring.
    use super::*;
    use crate::domain::ports::{
        FIXTURE_ADMIN_EMAIL, FIXTURE_PASSWORD, MockArchiveRepository, MockAssetRepository,
        MockEmployeeRepository, MockOrganisationRepository, MockPasswordHasher,
        MockReportingRepository, MockUserRepository,
    };
    use crate::domain::{ErrorCode, LoginCredentials};
    use actix_web::cookie::{Key, SameSite};
    use mockable::MockClock;
    use rstest::rstest;

    use crate::inbound::http::session_config::SessionSettings;

    fn repositories(users: MockUserRepository) -> Repositories {
        Repositories {
            users: Arc::new(users),
            employees: Arc::new(MockEmployeeRepository::new()),
            organisation: Arc::new(MockOrganisationRepository::new()),
            assets: Arc::new(MockAssetRepository::new()),
            archive: Arc::new(MockArchiveRepository::new()),
            reporting: Arc::new(MockReportingRepository::new()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn service_ports_route_logins_through_the_user_repository() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .withf(|email| email == "nobody@example.gov")
            .times(1)
            .return_once(|_| Ok(None));
        let ports = service_ports(
            &repositories(users),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(MockClock::new()),
        );

        let credentials = LoginCredentials::try_from_parts("nobody@example.gov", "password123")
            .expect("credentials shape");
        let err = ports
            .login
            .authenticate(&credentials)
            .await
            .expect_err("unknown account");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_pool_falls_back_to_fixtures() {
        let config = ServerConfig::new(
            SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            "127.0.0.1:0".parse().expect("socket address"),
        );
        let state = build_http_state(&config);

        let credentials = LoginCredentials::try_from_parts(FIXTURE_ADMIN_EMAIL, FIXTURE_PASSWORD)
            .expect("credentials shape");
        let account = state
            .login
            .authenticate(&credentials)
            .await
            .expect("fixture login");
        assert!(account.is_admin);
    }
}
