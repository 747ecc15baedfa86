mod requests;
mod responses;

use std::collections::HashMap;

use crate::{
    database::{assert, get_db_conn},
    models::{
        bookings::BookingData,
        games::{GameData, NewGame, UpdateGame},
        platforms::{NewPlatform, PlatformData, UpdatePlatform},
        rentals::{RentalData, RENTAL_STATUS_ACTIVE, RENTAL_STATUS_OVERDUE, RENTAL_STATUS_RETURNED},
    },
    protocol::{SimpleResponse, CODE_ALREADY_RETURNED},
    reject, DbPool,
};
use actix_web::{post, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(add_platform)
        .service(modify_platform)
        .service(delete_platform)
        .service(search_platform)
        .service(add_game)
        .service(modify_game)
        .service(delete_game)
        .service(search_game)
        .service(search_rental)
        .service(return_rental)
        .service(search_booking);
}

crate::post_funcs! {
    (add_platform, "/add_platform", AddPlatformRequest, SimpleResponse),
    (modify_platform, "/modify_platform", ModifyPlatformRequest, SimpleResponse),
    (delete_platform, "/delete_platform", DeletePlatformRequest, SimpleResponse),
    (search_platform, "/search_platform", SearchPlatformRequest, SearchPlatformResponse),
    (add_game, "/add_game", AddGameRequest, SimpleResponse),
    (modify_game, "/modify_game", ModifyGameRequest, SimpleResponse),
    (delete_game, "/delete_game", DeleteGameRequest, SimpleResponse),
    (search_game, "/search_game", SearchGameRequest, SearchGameResponse),
    (search_rental, "/search_rental", SearchRentalRequest, SearchRentalResponse),
    (return_rental, "/return_rental", ReturnRentalRequest, SimpleResponse),
    (search_booking, "/search_booking", SearchBookingRequest, SearchBookingResponse),
}

async fn add_platform_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddPlatformRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::platforms;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;

    web::block(move || {
        conn.transaction(|| {
            let res = platforms::table
                .filter(platforms::name.eq(&info.name))
                .count()
                .get_result::<i64>(&conn)
                .context("database error")?;
            if res > 0 {
                bail!("Platform name already exists");
            }

            let data = NewPlatform {
                name: info.name,
                description: info.description,
                created_at: Utc::now().naive_utc(),
            };
            diesel::insert_into(platforms::table)
                .values(data)
                .execute(&conn)
                .context("database error")?;

            Ok(())
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    Ok(SimpleResponse::ok())
}

async fn modify_platform_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyPlatformRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::platforms;

    let info = info.into_inner();
    assert::assert_platform(&pool, info.platform_id).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        let data = UpdatePlatform {
            name: info.name,
            description: info.description,
        };
        diesel::update(platforms::table.filter(platforms::id.eq(info.platform_id)))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("database error")?;

    Ok(SimpleResponse::ok())
}

async fn delete_platform_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeletePlatformRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::platforms;

    let info = info.into_inner();
    assert::assert_platform(&pool, info.platform_id).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(platforms::table.filter(platforms::id.eq(info.platform_id))).execute(&conn)
    })
    .await
    .context("database error")?;

    Ok(SimpleResponse::ok())
}

async fn search_platform_impl(
    pool: web::Data<DbPool>,
    _info: web::Json<SearchPlatformRequest>,
) -> anyhow::Result<SearchPlatformResponse> {
    use crate::schema::{games, platforms};

    let conn = get_db_conn(&pool)?;
    let (all_platforms, game_platform_ids) = web::block(move || {
        let all_platforms = platforms::table
            .order(platforms::name.asc())
            .get_results::<PlatformData>(&conn)?;
        let game_platform_ids = games::table
            .select(games::platform_id)
            .get_results::<u64>(&conn)?;
        Ok::<_, diesel::result::Error>((all_platforms, game_platform_ids))
    })
    .await
    .context("database error")?;

    let mut counts: HashMap<u64, i64> = HashMap::new();
    for platform_id in game_platform_ids {
        *counts.entry(platform_id).or_insert(0) += 1;
    }

    let platforms = all_platforms
        .into_iter()
        .map(|data| PlatformItem {
            game_count: counts.get(&data.id).copied().unwrap_or(0),
            id: data.id,
            name: data.name,
            description: data.description,
        })
        .collect();

    Ok(SearchPlatformResponse {
        success: true,
        platforms,
        ..Default::default()
    })
}

async fn add_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<AddGameRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::games;

    let info = info.into_inner();
    assert::assert_platform(&pool, info.platform_id).await?;

    let now = Utc::now().naive_utc();
    let total_copies = info.total_copies.unwrap_or(1);
    let data = NewGame {
        title: info.title,
        chinese_title: info.chinese_title,
        category: info.category,
        platform_id: info.platform_id,
        genre: info.genre,
        release_year: info.release_year,
        developer: info.developer,
        publisher: info.publisher,
        rating: info.rating,
        max_players: info.max_players,
        online_multiplayer: info.online_multiplayer.unwrap_or(false),
        description: info.description,
        cover_image: info.cover_image,
        total_copies,
        available_copies: total_copies,
        created_at: now,
        updated_at: now,
    };

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::insert_into(games::table)
            .values(data)
            .execute(&conn)
    })
    .await
    .context("database error")?;

    Ok(SimpleResponse::ok())
}

async fn modify_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ModifyGameRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::games;

    let info = info.into_inner();
    assert::assert_game(&pool, info.game_id).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let game = games::table
                .filter(games::id.eq(info.game_id))
                .get_result::<GameData>(&conn)
                .context("database error")?;

            let data = UpdateGame {
                title: info.title,
                chinese_title: info.chinese_title,
                category: info.category,
                platform_id: info.platform_id,
                genre: info.genre,
                release_year: info.release_year,
                developer: info.developer,
                publisher: info.publisher,
                rating: info.rating,
                max_players: info.max_players,
                online_multiplayer: info.online_multiplayer,
                description: info.description,
                cover_image: info.cover_image,
                updated_at: Some(Utc::now().naive_utc()),
            };
            diesel::update(games::table.filter(games::id.eq(info.game_id)))
                .set(&data)
                .execute(&conn)
                .context("database error")?;

            // adding or removing copies shifts availability by the same
            // amount, floored at zero
            if let Some(new_total) = info.total_copies {
                let difference = new_total - game.total_copies;
                let new_available = (game.available_copies + difference).max(0);
                diesel::update(games::table.filter(games::id.eq(info.game_id)))
                    .set((
                        games::total_copies.eq(new_total),
                        games::available_copies.eq(new_available),
                    ))
                    .execute(&conn)
                    .context("database error")?;
            }

            Ok(())
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    Ok(SimpleResponse::ok())
}

async fn delete_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<DeleteGameRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::games;

    let info = info.into_inner();
    assert::assert_game(&pool, info.game_id).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::delete(games::table.filter(games::id.eq(info.game_id))).execute(&conn)
    })
    .await
    .context("database error")?;

    Ok(SimpleResponse::ok())
}

/// Rebuilt for both the page fetch and the total count; boxed queries
/// cannot be cloned.
fn filtered_games(
    search: &Option<String>,
    platform_id: Option<u64>,
    genre: &Option<String>,
) -> crate::schema::games::BoxedQuery<'static, diesel::mysql::Mysql> {
    use crate::schema::games;

    let mut query = games::table.into_boxed();
    if let Some(search) = search {
        if !search.is_empty() {
            let pattern = crate::utils::get_str_pattern(search);
            query = query.filter(
                games::title
                    .like(pattern.clone())
                    .or(games::chinese_title.like(pattern)),
            );
        }
    }
    if let Some(platform_id) = platform_id {
        query = query.filter(games::platform_id.eq(platform_id));
    }
    if let Some(genre) = genre {
        query = query.filter(games::genre.like(crate::utils::get_str_pattern(genre)));
    }
    query
}

async fn search_game_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchGameRequest>,
) -> anyhow::Result<SearchGameResponse> {
    use crate::schema::{games, platforms};

    let info = info.into_inner();
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(50).max(0);

    let conn = get_db_conn(&pool)?;
    let (total, page, platform_names) = web::block(move || {
        let total = filtered_games(&info.search, info.platform_id, &info.genre)
            .count()
            .get_result::<i64>(&conn)?;
        let page = filtered_games(&info.search, info.platform_id, &info.genre)
            .order(games::title.asc())
            .offset(first_index)
            .limit(limit)
            .get_results::<GameData>(&conn)?;
        let platform_names: HashMap<u64, String> = platforms::table
            .select((platforms::id, platforms::name))
            .get_results::<(u64, String)>(&conn)?
            .into_iter()
            .collect();
        Ok::<_, diesel::result::Error>((total, page, platform_names))
    })
    .await
    .context("database error")?;

    let games = page
        .into_iter()
        .map(|game| {
            let platform = platform_names
                .get(&game.platform_id)
                .cloned()
                .unwrap_or_default();
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

async fn search_rental_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchRentalRequest>,
) -> anyhow::Result<SearchRentalResponse> {
    use crate::schema::{games, rentals};

    let info = info.into_inner();
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(50).max(0);

    let conn = get_db_conn(&pool)?;
    let (page, game_titles) = web::block(move || {
        let mut query = rentals::table.into_boxed();
        if let Some(status) = info.status {
            query = query.filter(rentals::status.eq(status));
        }
        if info.active_only.unwrap_or(false) {
            query = query
                .filter(rentals::status.eq_any(vec![RENTAL_STATUS_ACTIVE, RENTAL_STATUS_OVERDUE]));
        }
        let page = query
            .order(rentals::rental_date.desc())
            .offset(first_index)
            .limit(limit)
            .get_results::<RentalData>(&conn)?;

        let game_ids: Vec<u64> = page.iter().map(|rental| rental.game_id).collect();
        let game_titles: HashMap<u64, String> = games::table
            .filter(games::id.eq_any(game_ids))
            .select((games::id, games::title))
            .get_results::<(u64, String)>(&conn)?
            .into_iter()
            .collect();
        Ok::<_, diesel::result::Error>((page, game_titles))
    })
    .await
    .context("database error")?;

    let rentals = page
        .into_iter()
        .map(|rental| {
            let title = game_titles.get(&rental.game_id).cloned().unwrap_or_default();
            RentalItem::from_record(rental, title)
        })
        .collect();

    Ok(SearchRentalResponse {
        success: true,
        rentals,
        ..Default::default()
    })
}

async fn return_rental_impl(
    pool: web::Data<DbPool>,
    info: web::Json<ReturnRentalRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{games, rentals};

    let info = info.into_inner();
    assert::assert_rental(&pool, info.rental_id).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let rental = rentals::table
                .filter(rentals::id.eq(info.rental_id))
                .get_result::<RentalData>(&conn)
                .context("database error")?;
            if rental.status == RENTAL_STATUS_RETURNED {
                reject!(CODE_ALREADY_RETURNED, "Game already returned");
            }

            diesel::update(rentals::table.filter(rentals::id.eq(info.rental_id)))
                .set((
                    rentals::status.eq(RENTAL_STATUS_RETURNED),
                    rentals::return_date.eq(Utc::now().naive_utc()),
                ))
                .execute(&conn)
                .context("database error")?;

            diesel::update(games::table.filter(games::id.eq(rental.game_id)))
                .set(games::available_copies.eq(games::available_copies + 1))
                .execute(&conn)
                .context("database error")?;

            Ok(())
        })
    })
    .await
    .map_err(crate::utils::flatten_err)?;

    Ok(SimpleResponse::ok())
}

async fn search_booking_impl(
    pool: web::Data<DbPool>,
    info: web::Json<SearchBookingRequest>,
) -> anyhow::Result<SearchBookingResponse> {
    use crate::schema::{games, gaming_area_bookings};

    let info = info.into_inner();
    let first_index = info.first_index.unwrap_or(0).max(0);
    let limit = info.limit.unwrap_or(50).max(0);

    let date_from = match &info.date_from {
        Some(date) => Some(crate::utils::parse_date_str(date)?),
        None => None,
    };
    let date_to = match &info.date_to {
        Some(date) => Some(crate::utils::parse_date_str(date)?),
        None => None,
    };

    let conn = get_db_conn(&pool)?;
    let (page, game_titles) = web::block(move || {
        let mut query = gaming_area_bookings::table.into_boxed();
        if let Some(status) = info.status {
            query = query.filter(gaming_area_bookings::status.eq(status));
        }
        if let Some(date_from) = date_from {
            query = query.filter(gaming_area_bookings::booking_date.ge(date_from));
        }
        if let Some(date_to) = date_to {
            query = query.filter(gaming_area_bookings::booking_date.le(date_to));
        }
        if let Some(student_id) = info.student_id {
            query = query.filter(gaming_area_bookings::student_id.eq(student_id));
        }
        let page = query
            .order((
                gaming_area_bookings::booking_date.asc(),
                gaming_area_bookings::start_time.asc(),
            ))
            .offset(first_index)
            .limit(limit)
            .get_results::<BookingData>(&conn)?;

        let game_ids: Vec<u64> = page.iter().map(|booking| booking.game_id).collect();
        let game_titles: HashMap<u64, String> = games::table
            .filter(games::id.eq_any(game_ids))
            .select((games::id, games::title))
            .get_results::<(u64, String)>(&conn)?
            .into_iter()
            .collect();
        Ok::<_, diesel::result::Error>((page, game_titles))
    })
    .await
    .context("database error")?;

    let bookings = page
        .into_iter()
        .map(|booking| {
            let title = game_titles.get(&booking.game_id).cloned().unwrap_or_default();
            BookingItem::from_record(booking, title)
        })
        .collect();

    Ok(SearchBookingResponse {
        success: true,
        bookings,
        ..Default::default()
    })
}
