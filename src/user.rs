use crate::db::DbConnection;
use crate::types::ApiResult;
use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::Serialize;

#[derive(Debug, Queryable, Serialize)]
pub struct User {
    username: String,
    name: String,
    avatar_url: String,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    users: Vec<User>,
}

#[get("/")]
pub fn list(mut conn: DbConnection) -> ApiResult<UsersResponse> {
    use crate::db::schema::users::dsl::*;

    let loaded = users.load::<User>(&mut *conn)?;
    Ok(Json(UsersResponse { users: loaded }))
}
