use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{
    database::get_db_conn,
    protocol::{CODE_INVALID_GAME, CODE_INVALID_PLATFORM},
    reject, DbPool,
};

pub async fn assert_platform(pool: &web::Data<DbPool>, id: u64) -> anyhow::Result<()> {
    use crate::schema::platforms;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        platforms::table
            .filter(platforms::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("database error")?;

    if res == 0 {
        reject!(CODE_INVALID_PLATFORM, "Invalid platform");
    }

    Ok(())
}

pub async fn assert_game(pool: &web::Data<DbPool>, id: u64) -> anyhow::Result<()> {
    use crate::schema::games;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        games::table
            .filter(games::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("database error")?;

    if res == 0 {
        reject!(CODE_INVALID_GAME, "Invalid game selected");
    }

    Ok(())
}

pub async fn assert_rental(pool: &web::Data<DbPool>, id: u64) -> anyhow::Result<()> {
    use crate::schema::rentals;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        rentals::table
            .filter(rentals::id.eq(id))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("database error")?;

    if res == 0 {
        bail!("No such rental");
    }

    Ok(())
}
