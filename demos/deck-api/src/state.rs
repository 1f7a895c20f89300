/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Normalizes deck URLs by calling the provider APIs directly. Runs the
    /// blocking HTTP work on Tokio's blocking pool.
    pub importer: mtg_board_state::AsyncDeckImporter,
}
