pub fn create_interactions_tables() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS interactions (
        id UUID PRIMARY KEY,
        contact_id UUID REFERENCES contacts(id),
        company_id UUID REFERENCES companies(id),
        interaction_type VARCHAR(20) NOT NULL DEFAULT 'note',
        subject VARCHAR(200) NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        interaction_date TIMESTAMPTZ NOT NULL,
        duration_minutes INTEGER,
        attachment VARCHAR(500),
        is_important BOOLEAN NOT NULL DEFAULT FALSE,
        owner_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_interactions_owner ON interactions(owner_id);
    CREATE INDEX IF NOT EXISTS idx_interactions_contact ON interactions(contact_id);
    CREATE INDEX IF NOT EXISTS idx_interactions_company ON interactions(company_id);
    CREATE INDEX IF NOT EXISTS idx_interactions_date ON interactions(interaction_date);
    "#
}
