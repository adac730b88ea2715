//! SQL seeding for repository suites.

use chrono::NaiveDate;
use postgres::{Client, NoTls};

use super::format_postgres_error;

/// Email of the seeded employee and its linked account.
pub const SEEDED_EMAIL: &str = "maria.santos@example.gov";

/// Identifiers of the rows [`seed_office`] inserts.
#[derive(Debug, Clone, Copy)]
pub struct SeededOffice {
    pub org_unit_id: i64,
    pub position_id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    pub employee_id: i64,
    pub asset_id: i64,
}

/// Date of birth stored on the seeded employee's other info.
pub fn seeded_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(1988, 11, 2).unwrap_or_default()
}

fn insert_returning_id(
    client: &mut Client,
    sql: &str,
    params: &[&(dyn postgres::types::ToSql + Sync)],
) -> Result<i64, String> {
    client
        .query_one(sql, params)
        .map(|row| row.get::<_, i64>(0))
        .map_err(|err| format_postgres_error(&err))
}

/// One org unit, position, assignment place, linked account, employee with
/// other info, and an asset assigned to that employee.
pub fn seed_office(url: &str) -> Result<SeededOffice, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;

    let org_unit_id = insert_returning_id(
        &mut client,
        "INSERT INTO org_units (org_code, name) VALUES ('ENF', 'Enforcement') RETURNING id",
        &[],
    )?;
    let position_id = insert_returning_id(
        &mut client,
        concat!(
            "INSERT INTO positions (item_code, name, salary_grade, org_code) ",
            "VALUES ('ITEM-001', 'Inspector II', '15', 'ENF') RETURNING id"
        ),
        &[],
    )?;
    let assignment_id = insert_returning_id(
        &mut client,
        "INSERT INTO assignment_places (name) VALUES ('Main Office') RETURNING id",
        &[],
    )?;
    let user_id = insert_returning_id(
        &mut client,
        concat!(
            "INSERT INTO users (name, email, password_hash) ",
            "VALUES ('Maria Santos', $1, 'seeded-hash') RETURNING id"
        ),
        &[&SEEDED_EMAIL],
    )?;
    let employee_id = insert_returning_id(
        &mut client,
        concat!(
            "INSERT INTO employees (first_name, last_name, sex, email, status, ",
            "position_id, assignment_id, org_unit_id, user_id) ",
            "VALUES ('Maria', 'Santos', 'F', $1, 'Active', $2, $3, $4, $5) RETURNING id"
        ),
        &[&SEEDED_EMAIL, &position_id, &assignment_id, &org_unit_id, &user_id],
    )?;
    client
        .execute(
            concat!(
                "INSERT INTO other_infos (employee_id, date_of_birth, tin_no, civil_service) ",
                "VALUES ($1, $2, '123-456-789', 'Professional')"
            ),
            &[&employee_id, &seeded_date_of_birth()],
        )
        .map_err(|err| format_postgres_error(&err))?;
    let asset_id = insert_returning_id(
        &mut client,
        concat!(
            "INSERT INTO assets (asset_tag, name, category, location, purchase_date, ",
            "value_cents, condition, assigned_to, status, unit_qty) ",
            "VALUES ('PC-0001', 'Laptop', 'IT Equipment', 'Records', '2024-03-15', ",
            "4500000, 'Good', $1, 'In use', 1) RETURNING id"
        ),
        &[&employee_id],
    )?;

    Ok(SeededOffice {
        org_unit_id,
        position_id,
        assignment_id,
        user_id,
        employee_id,
        asset_id,
    })
}

/// Remove the seeded account so a restore has to create a new one.
pub fn delete_user(url: &str, user_id: i64) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute("DELETE FROM users WHERE id = $1", &[&user_id])
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}
