pub fn create_erp_tables() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS erp_customer_cache (
        id UUID PRIMARY KEY,
        company_id UUID NOT NULL REFERENCES companies(id),
        customer_code VARCHAR(50) NOT NULL,
        name VARCHAR(200) NOT NULL DEFAULT '',
        nip VARCHAR(20) NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        email VARCHAR(254) NOT NULL DEFAULT '',
        phone VARCHAR(50) NOT NULL DEFAULT '',
        payment_terms VARCHAR(100) NOT NULL DEFAULT '',
        credit_limit NUMERIC(12, 2) NOT NULL DEFAULT 0,
        balance NUMERIC(12, 2) NOT NULL DEFAULT 0,
        last_synced TIMESTAMPTZ NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_erp_cache_company ON erp_customer_cache(company_id);

    CREATE TABLE IF NOT EXISTS erp_sync_logs (
        id UUID PRIMARY KEY,
        company_id UUID,
        sync_type VARCHAR(50) NOT NULL,
        status VARCHAR(20) NOT NULL,
        records_synced INTEGER NOT NULL DEFAULT 0,
        error_message TEXT NOT NULL DEFAULT '',
        started_at TIMESTAMPTZ NOT NULL,
        completed_at TIMESTAMPTZ,
        duration_seconds DOUBLE PRECISION
    );

    CREATE INDEX IF NOT EXISTS idx_erp_sync_logs_company ON erp_sync_logs(company_id);
    "#
}
