use sea_orm::DatabaseConnection;

/// Shared state handed to every request handler.
///
/// `DatabaseConnection` is a pool handle; each request works on its own clone,
/// so no state is shared between requests beyond the database itself.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    /// Creates the state around an established connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
