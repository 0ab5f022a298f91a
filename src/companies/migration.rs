pub fn create_companies_tables() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        id UUID PRIMARY KEY,
        name VARCHAR(200) NOT NULL,
        nip VARCHAR(10) NOT NULL DEFAULT '',
        industry VARCHAR(100) NOT NULL DEFAULT '',
        website VARCHAR(200) NOT NULL DEFAULT '',
        phone VARCHAR(20) NOT NULL DEFAULT '',
        email VARCHAR(254) NOT NULL DEFAULT '',
        street VARCHAR(200) NOT NULL DEFAULT '',
        city VARCHAR(100) NOT NULL DEFAULT '',
        postal_code VARCHAR(10) NOT NULL DEFAULT '',
        country VARCHAR(100) NOT NULL DEFAULT 'Polska',
        erp_customer_code VARCHAR(50) NOT NULL DEFAULT '',
        notes TEXT NOT NULL DEFAULT '',
        owner_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_companies_owner ON companies(owner_id);
    CREATE INDEX IF NOT EXISTS idx_companies_name ON companies(name);
    "#
}
