use sea_orm::DatabaseConnection;

/// Shared state for the API handlers; the connection is a pool and cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
