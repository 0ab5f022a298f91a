diesel::table! {
    companies (id) {
        id -> Uuid,
        name -> Varchar,
        nip -> Varchar,
        industry -> Varchar,
        website -> Varchar,
        phone -> Varchar,
        email -> Varchar,
        street -> Varchar,
        city -> Varchar,
        postal_code -> Varchar,
        country -> Varchar,
        erp_customer_code -> Varchar,
        notes -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    contacts (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        mobile -> Varchar,
        company_id -> Nullable<Uuid>,
        position -> Varchar,
        status -> Varchar,
        tags -> Varchar,
        street -> Varchar,
        city -> Varchar,
        postal_code -> Varchar,
        country -> Varchar,
        notes -> Text,
        owner_id -> Uuid,
        last_contact_date -> Nullable<Date>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    interactions (id) {
        id -> Uuid,
        contact_id -> Nullable<Uuid>,
        company_id -> Nullable<Uuid>,
        interaction_type -> Varchar,
        subject -> Varchar,
        description -> Text,
        interaction_date -> Timestamptz,
        duration_minutes -> Nullable<Int4>,
        attachment -> Nullable<Varchar>,
        is_important -> Bool,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    tasks (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        status -> Varchar,
        priority -> Varchar,
        due_date -> Nullable<Timestamptz>,
        reminder_date -> Nullable<Timestamptz>,
        contact_id -> Nullable<Uuid>,
        company_id -> Nullable<Uuid>,
        owner_id -> Uuid,
        assigned_to -> Nullable<Uuid>,
        completed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    opportunities (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        amount -> Numeric,
        probability -> Int4,
        stage -> Varchar,
        expected_close_date -> Date,
        actual_close_date -> Nullable<Date>,
        lost_reason -> Nullable<Varchar>,
        lost_reason_details -> Text,
        contact_id -> Nullable<Uuid>,
        company_id -> Nullable<Uuid>,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    erp_customer_cache (id) {
        id -> Uuid,
        company_id -> Uuid,
        customer_code -> Varchar,
        name -> Varchar,
        nip -> Varchar,
        address -> Text,
        email -> Varchar,
        phone -> Varchar,
        payment_terms -> Varchar,
        credit_limit -> Numeric,
        balance -> Numeric,
        last_synced -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    erp_sync_logs (id) {
        id -> Uuid,
        company_id -> Nullable<Uuid>,
        sync_type -> Varchar,
        status -> Varchar,
        records_synced -> Int4,
        error_message -> Text,
        started_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
        duration_seconds -> Nullable<Float8>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    companies,
    contacts,
    interactions,
    tasks,
    opportunities,
    erp_customer_cache,
    erp_sync_logs,
);
