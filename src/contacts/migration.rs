pub fn create_contacts_tables() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id UUID PRIMARY KEY,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        email VARCHAR(254) NOT NULL,
        phone VARCHAR(20) NOT NULL DEFAULT '',
        mobile VARCHAR(20) NOT NULL DEFAULT '',
        company_id UUID REFERENCES companies(id),
        position VARCHAR(100) NOT NULL DEFAULT '',
        status VARCHAR(20) NOT NULL DEFAULT 'lead',
        tags VARCHAR(200) NOT NULL DEFAULT '',
        street VARCHAR(200) NOT NULL DEFAULT '',
        city VARCHAR(100) NOT NULL DEFAULT '',
        postal_code VARCHAR(10) NOT NULL DEFAULT '',
        country VARCHAR(100) NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        owner_id UUID NOT NULL,
        last_contact_date DATE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_contacts_email_unique ON contacts(email);
    CREATE INDEX IF NOT EXISTS idx_contacts_owner ON contacts(owner_id);
    CREATE INDEX IF NOT EXISTS idx_contacts_company ON contacts(company_id);
    CREATE INDEX IF NOT EXISTS idx_contacts_status ON contacts(status);
    "#
}
