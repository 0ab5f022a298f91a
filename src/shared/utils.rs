use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::PgConnection;
use diesel::QueryResult;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub fn create_conn(database_url: &str, max_connections: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_connections).build(manager)
}

/// Runs the per-module table migrations. Every statement is idempotent
/// (`CREATE TABLE IF NOT EXISTS`), so this is safe to execute on every boot.
pub fn run_migrations(conn: &mut PgConnection) -> QueryResult<()> {
    conn.batch_execute(crate::companies::create_companies_tables())?;
    conn.batch_execute(crate::contacts::create_contacts_tables())?;
    conn.batch_execute(crate::interactions::create_interactions_tables())?;
    conn.batch_execute(crate::tasks::create_tasks_tables())?;
    conn.batch_execute(crate::opportunities::create_opportunities_tables())?;
    conn.batch_execute(crate::erp::create_erp_tables())?;
    Ok(())
}

/// Joins the non-empty parts of an address with `", "`. The middle part is
/// the postal code and city together, the way envelopes are addressed.
pub fn join_address(street: &str, postal_code: &str, city: &str, country: &str) -> String {
    let postal_city = format!("{} {}", postal_code, city).trim().to_string();
    [street, postal_city.as_str(), country]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_address_full() {
        assert_eq!(
            join_address("ul. Prosta 1", "00-001", "Warszawa", "Polska"),
            "ul. Prosta 1, 00-001 Warszawa, Polska"
        );
    }

    #[test]
    fn test_join_address_skips_empty_parts() {
        assert_eq!(join_address("", "", "Warszawa", "Polska"), "Warszawa, Polska");
        assert_eq!(join_address("", "", "", ""), "");
    }
}
