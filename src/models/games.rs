use crate::schema::games;
use chrono::NaiveDateTime;

pub const GAME_CATEGORY_GAME: &str = "Game";
pub const GAME_CATEGORY_MOVIE: &str = "Movie";

#[derive(Queryable)]
pub struct GameData {
    pub id: u64,
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
    pub online_multiplayer: bool,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "games"]
pub struct NewGame {
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
    pub online_multiplayer: bool,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "games"]
pub struct UpdateGame {
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
    pub updated_at: Option<NaiveDateTime>,
}
