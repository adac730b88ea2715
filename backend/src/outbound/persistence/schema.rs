//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// User accounts.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        is_admin -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organisational units keyed by a unique org code.
    org_units (id) {
        id -> Int8,
        org_code -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Plantilla positions keyed by a unique item code.
    positions (id) {
        id -> Int8,
        item_code -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        salary_grade -> Nullable<Varchar>,
        /// Soft reference to `org_units.org_code`.
        org_code -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    assignment_places (id) {
        id -> Int8,
        name -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    employees (id) {
        id -> Int8,
        first_name -> Varchar,
        middle_name -> Nullable<Varchar>,
        last_name -> Varchar,
        suffix -> Nullable<Varchar>,
        /// `M` or `F`.
        sex -> Varchar,
        email -> Varchar,
        /// `Active`, `Inactive`, or `On Leave`.
        status -> Varchar,
        position_id -> Int8,
        assignment_id -> Int8,
        org_unit_id -> Int8,
        user_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Supplementary details, one row per employee.
    other_infos (employee_id) {
        employee_id -> Int8,
        date_of_birth -> Date,
        tin_no -> Nullable<Varchar>,
        date_appointment -> Nullable<Date>,
        date_last_promotion -> Nullable<Date>,
        civil_service -> Nullable<Varchar>,
        education -> Nullable<Text>,
    }
}

diesel::table! {
    assets (id) {
        id -> Int8,
        asset_tag -> Varchar,
        name -> Varchar,
        category -> Varchar,
        location -> Varchar,
        purchase_date -> Date,
        /// Centavos.
        value_cents -> Int8,
        condition -> Varchar,
        assigned_to -> Nullable<Int8>,
        status -> Varchar,
        property_no -> Nullable<Varchar>,
        serial_no -> Nullable<Varchar>,
        unit_qty -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    archived_positions (id) {
        id -> Int8,
        original_position_id -> Int8,
        item_code -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        salary_grade -> Nullable<Varchar>,
        org_code -> Nullable<Varchar>,
        archived_at -> Timestamptz,
    }
}

diesel::table! {
    archived_employees (id) {
        id -> Int8,
        original_employee_id -> Int8,
        first_name -> Varchar,
        middle_name -> Nullable<Varchar>,
        last_name -> Varchar,
        suffix -> Nullable<Varchar>,
        sex -> Varchar,
        email -> Varchar,
        status -> Varchar,
        position_id -> Int8,
        assignment_id -> Int8,
        org_unit_id -> Int8,
        user_id -> Nullable<Int8>,
        date_of_birth -> Nullable<Date>,
        tin_no -> Nullable<Varchar>,
        date_appointment -> Nullable<Date>,
        date_last_promotion -> Nullable<Date>,
        civil_service -> Nullable<Varchar>,
        education -> Nullable<Text>,
        archived_at -> Timestamptz,
    }
}

diesel::table! {
    archived_assets (id) {
        id -> Int8,
        original_asset_id -> Int8,
        asset_tag -> Varchar,
        name -> Varchar,
        category -> Varchar,
        location -> Varchar,
        purchase_date -> Date,
        value_cents -> Int8,
        condition -> Varchar,
        assigned_to -> Nullable<Int8>,
        status -> Varchar,
        property_no -> Nullable<Varchar>,
        serial_no -> Nullable<Varchar>,
        unit_qty -> Int4,
        archived_at -> Timestamptz,
    }
}

diesel::joinable!(employees -> positions (position_id));
diesel::joinable!(employees -> assignment_places (assignment_id));
diesel::joinable!(employees -> org_units (org_unit_id));
diesel::joinable!(employees -> users (user_id));
diesel::joinable!(other_infos -> employees (employee_id));
diesel::joinable!(assets -> employees (assigned_to));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    org_units,
    positions,
    assignment_places,
    employees,
    other_infos,
    assets,
    archived_positions,
    archived_employees,
    archived_assets,
);
