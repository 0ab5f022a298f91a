pub fn create_opportunities_tables() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS opportunities (
        id UUID PRIMARY KEY,
        name VARCHAR(200) NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount NUMERIC(12, 2) NOT NULL,
        probability INTEGER NOT NULL DEFAULT 50,
        stage VARCHAR(20) NOT NULL DEFAULT 'qualification',
        expected_close_date DATE NOT NULL,
        actual_close_date DATE,
        lost_reason VARCHAR(20),
        lost_reason_details TEXT NOT NULL DEFAULT '',
        contact_id UUID REFERENCES contacts(id),
        company_id UUID REFERENCES companies(id),
        owner_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_opportunities_owner ON opportunities(owner_id);
    CREATE INDEX IF NOT EXISTS idx_opportunities_stage ON opportunities(stage);
    CREATE INDEX IF NOT EXISTS idx_opportunities_close_date ON opportunities(expected_close_date);
    "#
}
