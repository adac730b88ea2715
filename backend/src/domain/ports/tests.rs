//! Behavioural checks shared across the port definitions.

use super::*;
use crate::domain::{ErrorCode, UserId};
use rstest::rstest;

#[rstest]
#[case(UserPersistenceError::connection("refused").to_string(), "user repository connection failed: refused")]
#[case(EmployeePersistenceError::duplicate_email("a@b.gov").to_string(), "employee email already registered: a@b.gov")]
#[case(OrganisationPersistenceError::duplicate_code("FIN").to_string(), "organisation code already registered: FIN")]
#[case(AssetPersistenceError::duplicate_tag("PC-1").to_string(), "asset tag already registered: PC-1")]
#[case(ArchivePersistenceError::missing("employee 4").to_string(), "archive source row missing: employee 4")]
#[case(PasswordHasherError::hash("cost").to_string(), "password hashing failed: cost")]
fn port_errors_render_context(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}

#[rstest]
#[tokio::test]
async fn fixtures_return_empty_listings() {
    assert!(FixtureEmployeeDirectory.list().await.expect("list").is_empty());
    assert!(FixtureInventoryRegister.list().await.expect("list").is_empty());
    assert!(FixtureUserAdministration.list().await.expect("list").is_empty());
    assert!(
        FixtureArchiveQuery
            .archived_employees()
            .await
            .expect("list")
            .is_empty()
    );
    let options = FixtureOrganisationCatalogue.options().await.expect("options");
    assert!(options.positions.is_empty());
    assert_eq!(options.employment_statuses.len(), 3);
}

#[rstest]
#[tokio::test]
async fn fixtures_report_missing_records() {
    let err = FixtureUserAdministration
        .profile(UserId::new(5))
        .await
        .expect_err("no profile");
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = FixtureReportingQuery
        .dashboard()
        .await
        .expect_err("no dashboard");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
