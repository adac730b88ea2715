//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockAssetRepository, MockEmployeeRepository, MockPasswordHasher, MockUserRepository,
    UserPersistenceError,
};
use crate::domain::service_test_support::{account, asset, employee_record};
use crate::domain::{ErrorCode, PasswordHash, Role, UserCredentials};

struct Mocks {
    users: MockUserRepository,
    employees: MockEmployeeRepository,
    assets: MockAssetRepository,
    hasher: MockPasswordHasher,
}

impl Mocks {
    fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            employees: MockEmployeeRepository::new(),
            assets: MockAssetRepository::new(),
            hasher: MockPasswordHasher::new(),
        }
    }

    fn service(self) -> AccountService {
        AccountService::new(
            Arc::new(self.users),
            Arc::new(self.employees),
            Arc::new(self.assets),
            Arc::new(self.hasher),
        )
    }
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("maria@example.gov", password).expect("credentials shape")
}

fn user_form(password: Option<&str>) -> UserForm {
    UserForm {
        name: Some("Maria Clara Santos".to_owned()),
        email: Some("maria@example.gov".to_owned()),
        password: password.map(str::to_owned),
        password_confirmation: password.map(str::to_owned),
    }
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn authenticate_checks_the_stored_hash(
    #[case] verified: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_credentials_by_email()
        .withf(|email| email == "maria@example.gov")
        .times(1)
        .return_once(|_| {
            Ok(Some(UserCredentials {
                account: account(7, "maria@example.gov", false),
                password_hash: PasswordHash::new("$2b$12$hash"),
            }))
        });
    mocks
        .hasher
        .expect_verify()
        .withf(|password, hash| {
            password == "secret-pass" && *hash == PasswordHash::new("$2b$12$hash")
        })
        .times(1)
        .return_once(move |_, _| Ok(verified));

    let result = mocks.service().authenticate(&credentials("secret-pass")).await;
    match expected_error {
        None => assert_eq!(result.expect("authenticated").id, UserId::new(7)),
        Some(code) => assert_eq!(result.expect_err("rejected").code(), code),
    }
}

#[rstest]
#[tokio::test]
async fn authenticate_hides_unknown_emails() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_credentials_by_email()
        .return_once(|_| Ok(None));
    mocks.hasher.expect_verify().never();

    let err = mocks
        .service()
        .authenticate(&credentials("secret-pass"))
        .await
        .expect_err("unknown email");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS);
}

#[rstest]
#[tokio::test]
async fn authenticate_reports_outages() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_credentials_by_email()
        .return_once(|_| Err(UserPersistenceError::connection("pool exhausted")));

    let err = mocks
        .service()
        .authenticate(&credentials("secret-pass"))
        .await
        .expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_hashes_password_and_inserts_regular_account() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_email_taken()
        .withf(|email, except| email == "maria@example.gov" && except.is_none())
        .return_once(|_, _| Ok(false));
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password == "password123")
        .return_once(|_| Ok(PasswordHash::new("$2b$12$new")));
    mocks
        .users
        .expect_insert()
        .withf(|user| !user.is_admin && user.password_hash == PasswordHash::new("$2b$12$new"))
        .times(1)
        .return_once(|_| Ok(account(11, "maria@example.gov", false)));

    let created = mocks
        .service()
        .create(&user_form(Some("password123")))
        .await
        .expect("account created");
    assert_eq!(created.id, UserId::new(11));
}

#[rstest]
#[tokio::test]
async fn create_rejects_taken_email_as_field_error() {
    let mut mocks = Mocks::new();
    mocks.users.expect_email_taken().return_once(|_, _| Ok(true));
    mocks.users.expect_insert().never();

    let err = mocks
        .service()
        .create(&user_form(Some("password123")))
        .await
        .expect_err("email taken");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("field details");
    assert_eq!(details["fields"][0]["field"], "email");
    assert_eq!(details["fields"][0]["code"], "taken");
}

#[rstest]
#[tokio::test]
async fn create_rejects_short_passwords_without_touching_storage() {
    let mut mocks = Mocks::new();
    mocks.users.expect_email_taken().never();

    let err = mocks
        .service()
        .create(&user_form(Some("short")))
        .await
        .expect_err("password too short");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_skips_hashing_without_new_password() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_email_taken()
        .withf(|_, except| *except == Some(UserId::new(4)))
        .return_once(|_, _| Ok(false));
    mocks.hasher.expect_hash().never();
    mocks
        .users
        .expect_update()
        .withf(|id, changes| *id == UserId::new(4) && changes.password_hash.is_none())
        .return_once(|_, _| Ok(Some(account(4, "maria@example.gov", false))));

    let updated = mocks
        .service()
        .update(UserId::new(4), &user_form(None))
        .await
        .expect("updated");
    assert_eq!(updated.id, UserId::new(4));
}

#[rstest]
#[tokio::test]
async fn update_reports_missing_account() {
    let mut mocks = Mocks::new();
    mocks.users.expect_email_taken().return_once(|_, _| Ok(false));
    mocks.users.expect_update().return_once(|_, _| Ok(None));

    let err = mocks
        .service()
        .update(UserId::new(4), &user_form(None))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn profile_includes_employee_and_assets() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(account(3, "maria@example.gov", true))));
    mocks
        .employees
        .expect_find_by_email()
        .withf(|email| email == "maria@example.gov")
        .return_once(|_| Ok(Some(employee_record(8, "maria@example.gov"))));
    mocks
        .assets
        .expect_assigned_to()
        .withf(|employee| employee.get() == 8)
        .return_once(|_| Ok(vec![asset(1, Some(8)), asset(2, Some(8))]));

    let profile = mocks
        .service()
        .profile(UserId::new(3))
        .await
        .expect("profile");
    assert_eq!(profile.role, Role::Admin);
    assert_eq!(profile.assets.len(), 2);
    assert!(profile.employee.is_some());
}

#[rstest]
#[tokio::test]
async fn profile_without_employee_has_no_assets() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_id()
        .return_once(|_| Ok(Some(account(3, "maria@example.gov", false))));
    mocks.employees.expect_find_by_email().return_once(|_| Ok(None));
    mocks.assets.expect_assigned_to().never();

    let profile = mocks
        .service()
        .profile(UserId::new(3))
        .await
        .expect("profile");
    assert_eq!(profile.role, Role::User);
    assert!(profile.employee.is_none());
    assert!(profile.assets.is_empty());
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_accounts(
    #[case] deleted: bool,
    #[case] expected_error: Option<ErrorCode>,
) {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_delete()
        .return_once(move |_| Ok(deleted));

    let result = mocks.service().delete(UserId::new(9)).await;
    assert_eq!(result.err().map(|err| err.code()), expected_error);
}

#[rstest]
#[tokio::test]
async fn ensure_admin_creates_a_missing_administrator() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_email()
        .withf(|email| email == "root@example.gov")
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$2b$12$boot")));
    mocks
        .users
        .expect_insert()
        .withf(|user| user.is_admin && user.name == "Administrator")
        .times(1)
        .return_once(|_| Ok(account(1, "root@example.gov", true)));

    let created = mocks
        .service()
        .ensure_admin("root@example.gov", "bootstrap-secret")
        .await
        .expect("bootstrap succeeds");
    assert_eq!(created.map(|user| user.id), Some(UserId::new(1)));
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn ensure_admin_leaves_existing_accounts_alone(#[case] is_admin: bool) {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(account(4, "root@example.gov", is_admin))));
    mocks.hasher.expect_hash().never();
    mocks.users.expect_insert().never();

    let created = mocks
        .service()
        .ensure_admin("root@example.gov", "bootstrap-secret")
        .await
        .expect("bootstrap succeeds");
    assert!(created.is_none());
}

#[rstest]
#[case("not-an-email", "bootstrap-secret")]
#[case("root@example.gov", "short")]
#[tokio::test]
async fn ensure_admin_validates_its_inputs(#[case] email: &str, #[case] password: &str) {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_email().never();
    mocks.users.expect_insert().never();

    let err = mocks
        .service()
        .ensure_admin(email, password)
        .await
        .expect_err("invalid bootstrap input");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
