use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddPlatformRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct ModifyPlatformRequest {
    pub platform_id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct DeletePlatformRequest {
    pub platform_id: u64,
}

#[derive(Deserialize)]
pub struct SearchPlatformRequest {}

#[derive(Deserialize)]
pub struct AddGameRequest {
    pub title: String,
    pub chinese_title: Option<String>,
    pub category: Option<String>,
    pub platform_id: u64,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub rating: Option<String>,
    pub max_players: Option<i32>,
    pub online_multiplayer: Option<bool>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub total_copies: Option<i32>,
}

#[derive(Deserialize)]
pub struct ModifyGameRequest {
    pub game_id: u64,
    pub title: Option<String>,
    pub chinese_title: Option<String>,
    pub category: Option<String>,
    pub platform_id: Option<u64>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub rating: Option<String>,
    pub max_players: Option<i32>,
    pub online_multiplayer: Option<bool>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub total_copies: Option<i32>,
}

#[derive(Deserialize)]
pub struct DeleteGameRequest {
    pub game_id: u64,
}

#[derive(Deserialize)]
pub struct SearchGameRequest {
    pub search: Option<String>,
    pub platform_id: Option<u64>,
    pub genre: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct SearchRentalRequest {
    pub status: Option<String>,
    pub active_only: Option<bool>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct ReturnRentalRequest {
    pub rental_id: u64,
}

#[derive(Deserialize)]
pub struct SearchBookingRequest {
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub student_id: Option<String>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}
