use crate::db::DbConnection;
use crate::types::ApiResult;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Debug, Queryable, Serialize)]
pub struct Topic {
    slug: String,
    description: String,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    topics: Vec<Topic>,
}

#[get("/")]
pub fn list(mut conn: DbConnection) -> ApiResult<TopicsResponse> {
    use crate::db::schema::topics::dsl::*;

    let loaded = topics.load::<Topic>(&mut *conn)?;
    Ok(Json(TopicsResponse { topics: loaded }))
}
