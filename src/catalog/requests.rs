use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchGameRequest {
    pub q: Option<String>,
    pub platform_id: Option<u64>,
    /// Comma-separated game-type tokens, all of which must match.
    pub genres: Option<String>,
    /// Comma-separated decade tokens ("2010s"), any of which may match.
    pub decades: Option<String>,
    /// Comma-separated style tokens (Single Player, Multiplayer,
    /// Online Multiplayer, Game, Movie).
    pub styles: Option<String>,
    pub available_only: Option<bool>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ViewGameRequest {
    pub game_id: u64,
}

#[derive(Deserialize)]
pub struct BrowsingMetadataRequest {}

#[derive(Deserialize)]
pub struct RentGameRequest {
    pub game_id: u64,
    pub user_name: String,
    pub user_email: String,
    pub rental_duration_days: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewRentalRequest {
    pub rental_id: u64,
}
