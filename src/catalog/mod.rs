mod requests;
mod responses;
mod utils;

use std::collections::HashMap;

use crate::{
    config::AppConfig,
    database::{assert, get_db_conn, last_insert_id},
    models::{
        games::{GameData, GAME_CATEGORY_GAME, GAME_CATEGORY_MOVIE},
        rentals::{NewRental, RentalData, RENTAL_STATUS_ACTIVE},
    },
    protocol::{CODE_INVALID_GAME, CODE_NO_COPIES},
    reject, DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::{Datelike, Duration, Utc};
use diesel::{mysql::Mysql, prelude::*, sql_types::Bool, BoxableExpression};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(search_game)
        .service(view_game)
        .service(browsing_metadata)
        .service(rent_game)
        .service(view_rental);
}

crate::post_funcs! {
    (search_game, "/search_game", SearchGameRequest, SearchGameResponse),
    (view_game, "/view_game", ViewGameRequest, ViewGameResponse),
    (browsing_metadata, "/browsing_metadata", BrowsingMetadataRequest, BrowsingMetadataResponse),
    (view_rental, "/view_rental", ViewRentalRequest, ViewRentalResponse),
}

crate::post_policy_funcs! {
    (rent_game, "/rent_game", RentGameRequest, RentGameResponse),
}

struct GameFilters {
    pattern: Option<String>,
    platform_id: Option<u64>,
    genres: Vec<String>,
    decades: Vec<(i32, i32)>,
    styles: Vec<String>,
    available_only: bool,
}

impl GameFilters {
    fn from_request(info: &SearchGameRequest) -> Self {
        let split_tokens = |s: &Option<String>| -> Vec<String> {
            s.as_deref()
                .unwrap_or("")
                .split(',')
                .filter(|token| !token.is_empty())
                .map(|token| token.to_string())
                .collect()
        };

        Self {
            pattern: info
                .q
                .as_ref()
                .filter(|q| !q.is_empty())
                .map(crate::utils::get_str_pattern),
            platform_id: info.platform_id,
            genres: split_tokens(&info.genres),
            decades: split_tokens(&info.decades)
                .iter()
                .filter_map(|token| utils::parse_decade(token))
                .collect(),
            styles: split_tokens(&info.styles),
            available_only: info.available_only.unwrap_or(false),
        }
    }
}

/// Rebuilds the filtered query for both the page fetch and the total
/// count; boxed queries cannot be cloned.
fn filtered_games(filters: &GameFilters) -> crate::schema::games::BoxedQuery<'static, Mysql> {
    use crate::schema::games;

    let mut query = games::table.into_boxed();

    if let Some(pattern) = &filters.pattern {
        query = query.filter(
            games::title
                .like(pattern.clone())
                .or(games::chinese_title.like(pattern.clone())),
        );
    }
    if let Some(platform_id) = filters.platform_id {
        query = query.filter(games::platform_id.eq(platform_id));
    }
    // every selected game type narrows the result
    for genre in &filters.genres {
        query = query.filter(games::genre.like(crate::utils::get_str_pattern(genre)));
    }
    // decades widen: any selected decade may match
    let mut decade_cond: Option<Box<dyn BoxableExpression<games::table, Mysql, SqlType = Bool>>> =
        None;
    for (start, end) in &filters.decades {
        let expr = games::release_year.between(*start, *end);
        decade_cond = Some(match decade_cond {
            Some(prev) => Box::new(prev.or(expr)),
            None => Box::new(expr),
        });
    }
    if let Some(cond) = decade_cond {
        query = query.filter(cond);
    }
    for style in &filters.styles {
        query = match style.as_str() {
            "Single Player" => query.filter(games::max_players.eq(1)),
            "Multiplayer" => query.filter(games::max_players.gt(1)),
            "Online Multiplayer" => query.filter(games::online_multiplayer.eq(true)),
            GAME_CATEGORY_GAME | GAME_CATEGORY_MOVIE => {
                query.filter(games::category.eq(style.clone()))
            }
            _ => query,
        };
    }
    if filters.available_only {
        query = query.filter(games::available_copies.gt(0));
    }

    query
}

fn platform_names(
    conn: &diesel::MysqlConnection,
) -> diesel::QueryResult<HashMap<u64, String>> {
    use crate::schema::platforms;

    let names = platforms::table
        .select((platforms::id, platforms::name))
        .get_results::<(u64, String)>(conn)?;
    Ok(names.into_iter().collect())
}

async fn search_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchGameRequest>,
) -> anyhow::Result<SearchGameResponse> {
    use crate::schema::games;

    let info = info.into_inner();
    let filters = GameFilters::from_request(&info);
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(20).max(0);

    let conn = get_db_conn(&pool)?;
    let (total, page, platforms) = web::block(move || {
        let total = filtered_games(&filters).count().get_result::<i64>(&conn)?;
        let page = filtered_games(&filters)
            .order(games::title.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<GameData>(&conn)?;
        let platforms = platform_names(&conn)?;
        Ok::<_, diesel::result::Error>((total, page, platforms))
    })
    .await
    .context("database error")?;

    let games = page
        .into_iter()
        .map(|game| {
            let platform = platforms.get(&game.platform_id).cloned().unwrap_or_default();
            GameItem::from_record(game, platform)
        })
        .collect();

    Ok(SearchGameResponse {
        success: true,
        games,
        total,
        ..Default::default()
    })
}

async fn view_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewGameRequest>,
) -> anyhow::Result<ViewGameResponse> {
    use crate::schema::{games, platforms};

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    let res = web::block(move || {
        games::table
            .filter(games::id.eq(info.game_id))
            .inner_join(platforms::table)
            .get_result::<(GameData, crate::models::platforms::PlatformData)>(&conn)
            .optional()
    })
    .await
    .context("database error")?;

    match res {
        Some((game, platform)) => Ok(ViewGameResponse {
            success: true,
            game: Some(GameItem::from_record(game, platform.name)),
            ..Default::default()
        }),
        None => reject!(CODE_INVALID_GAME, "Invalid game selected"),
    }
}

async fn browsing_metadata_impl(
    pool: web::Data<DbPool>,
    _info: web::Json<BrowsingMetadataRequest>,
) -> anyhow::Result<BrowsingMetadataResponse> {
    use crate::schema::games;
    use diesel::dsl::{max, min};

    const MIN_GENRE_COUNT: usize = 5;

    let conn = get_db_conn(&pool)?;
    let (genres, year_range, categories) = web::block(move || {
        let genres = games::table
            .select(games::genre)
            .get_results::<Option<String>>(&conn)?;
        // diesel 1.4 can't select two aggregates in one tuple, so query them separately
        let min_year = games::table
            .select(min(games::release_year))
            .first::<Option<i32>>(&conn)?;
        let max_year = games::table
            .select(max(games::release_year))
            .first::<Option<i32>>(&conn)?;
        let year_range = (min_year, max_year);
        let categories = games::table
            .select(games::category)
            .distinct()
            .get_results::<Option<String>>(&conn)?;
        Ok::<_, diesel::result::Error>((genres, year_range, categories))
    })
    .await
    .context("database error")?;

    let mut genre_counts: HashMap<String, usize> = HashMap::new();
    for genre in genres.into_iter().flatten() {
        for token in utils::genre_tokens(&genre) {
            *genre_counts.entry(token).or_insert(0) += 1;
        }
    }
    let mut game_types: Vec<String> = genre_counts
        .into_iter()
        .filter(|(_, count)| *count >= MIN_GENRE_COUNT)
        .map(|(token, _)| token)
        .collect();
    game_types.sort();

    let min_year = year_range.0.unwrap_or(2000);
    let max_year = year_range.1.unwrap_or_else(|| Utc::today().year());
    let start_decade = min_year / 10 * 10;
    let end_decade = max_year / 10 * 10;
    let mut decades = Vec::new();
    let mut decade = end_decade;
    while decade >= start_decade {
        decades.push(format!("{}s", decade));
        decade -= 10;
    }

    let mut styles: Vec<String> = vec![
        "Single Player".to_string(),
        "Multiplayer".to_string(),
        "Online Multiplayer".to_string(),
    ];
    for category in categories.into_iter().flatten() {
        if !styles.contains(&category) {
            styles.push(category);
        }
    }
    styles.sort();

    Ok(BrowsingMetadataResponse {
        success: true,
        decades,
        game_types,
        styles,
        ..Default::default()
    })
}

async fn rent_game_impl(
    pool: web::Data<DbPool>,
    config: web::Data<AppConfig>,
    info: web::Json<RentGameRequest>,
) -> anyhow::Result<RentGameResponse> {
    use crate::schema::{games, rentals};

    let info = info.into_inner();
    assert::assert_game(&pool, info.game_id).await?;

    let duration_days = info
        .rental_duration_days
        .unwrap_or(config.default_rental_duration_days);

    let conn = get_db_conn(&pool)?;
    let rental = web::block(move || {
        conn.transaction(|| {
            let game = games::table
                .filter(games::id.eq(info.game_id))
                .get_result::<GameData>(&conn)
                .context("database error")?;
            if game.available_copies <= 0 {
                reject!(CODE_NO_COPIES, "No copies available");
            }

            let now = Utc::now().naive_utc();
            let data = NewRental {
                game_id: game.id,
                user_name: info.user_name,
                user_email: info.user_email,
                rental_date: now,
                due_date: now + Duration::days(duration_days),
                status: RENTAL_STATUS_ACTIVE.to_string(),
                notes: info.notes,
                created_at: now,
            };
            diesel::insert_into(rentals::table)
                .values(data)
                .execute(&conn)
                .context("database error")?;
            let rental_id = diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("database error")?;

            diesel::update(games::table.filter(games::id.eq(game.id)))
                .set(games::available_copies.eq(games::available_copies - 1))
                .execute(&conn)
                .context("database error")?;
            let rental = rentals::table
                .filter(rentals::id.eq(rental_id))
                .get_result::<RentalData>(&conn)
                .context("database error")?;

            Ok(RentalItem::from_record(rental, game.title))
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    log::info!("rental {} opened for game {}", rental.id, rental.game_id);

    Ok(RentGameResponse {
        success: true,
        rental: Some(rental),
        ..Default::default()
    })
}

async fn view_rental_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ViewRentalRequest>,
) -> anyhow::Result<ViewRentalResponse> {
    use crate::schema::{games, rentals};

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    let res = web::block(move || {
        rentals::table
            .filter(rentals::id.eq(info.rental_id))
            .inner_join(games::table)
            .get_result::<(RentalData, GameData)>(&conn)
            .optional()
    })
    .await
    .context("database error")?;

    match res {
        Some((rental, game)) => Ok(ViewRentalResponse {
            success: true,
            rental: Some(RentalItem::from_record(rental, game.title)),
            ..Default::default()
        }),
        None => bail!("No such rental"),
    }
}
