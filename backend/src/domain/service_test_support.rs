//! Sample aggregates shared by the service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Asset, AssetId, AssetValue, AssignmentPlaceId, EmailAddress, Employee, EmployeeId,
    EmployeeLabels, EmployeeRecord, EmploymentStatus, OrgUnitId, OtherInfo, Position, PositionId,
    Sex, UserAccount, UserId,
};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 18, 9, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at [`fixture_timestamp`].
pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn account(id: i64, address: &str, is_admin: bool) -> UserAccount {
    UserAccount {
        id: UserId::new(id),
        name: "Maria Clara Santos".to_owned(),
        email: email(address),
        is_admin,
    }
}

pub(crate) fn employee(id: i64, address: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        first_name: "Maria".to_owned(),
        middle_name: Some("Clara".to_owned()),
        last_name: "Santos".to_owned(),
        suffix: None,
        sex: Sex::F,
        email: address.to_owned(),
        status: EmploymentStatus::Active,
        position_id: PositionId::new(10),
        assignment_id: AssignmentPlaceId::new(20),
        org_unit_id: OrgUnitId::new(30),
        user_id: Some(UserId::new(id)),
    }
}

pub(crate) fn employee_record(id: i64, address: &str) -> EmployeeRecord {
    EmployeeRecord::new(
        employee(id, address),
        EmployeeLabels {
            position_name: "Administrative Officer".to_owned(),
            item_code: Some("AO-2".to_owned()),
            salary_grade: Some("SG-15".to_owned()),
            assignment_name: "Main Office".to_owned(),
            org_unit_name: "Admin".to_owned(),
        },
        Some(OtherInfo {
            date_of_birth: date(1991, 7, 4),
            tin_no: None,
            date_appointment: None,
            date_last_promotion: None,
            civil_service: None,
            education: None,
        }),
    )
}

pub(crate) fn position(id: i64, item_code: &str) -> Position {
    Position {
        id: PositionId::new(id),
        item_code: item_code.to_owned(),
        name: "Administrative Officer".to_owned(),
        description: None,
        salary_grade: Some("SG-15".to_owned()),
        org_code: Some("ADM".to_owned()),
    }
}

pub(crate) fn asset(id: i64, assigned_to: Option<i64>) -> Asset {
    Asset {
        id: AssetId::new(id),
        asset_tag: format!("PC-{id:04}"),
        name: "Laptop".to_owned(),
        category: "IT Equipment".to_owned(),
        location: "Main Office".to_owned(),
        purchase_date: date(2024, 8, 1),
        value: AssetValue::from_cents(5_500_000).expect("in range"),
        condition: "Good".to_owned(),
        assigned_to: assigned_to.map(EmployeeId::new),
        status: "In use".to_owned(),
        property_no: None,
        serial_no: None,
        unit_qty: 1,
    }
}
