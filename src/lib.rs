#[macro_use]
extern crate rocket;

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod db;
pub mod types;
pub mod utils;

pub mod article;
pub mod catalog;
pub mod comment;
pub mod topic;
pub mod user;

use rocket::response::content;
use rocket::{Build, Rocket};
use serde_json::json;

#[catch(404)]
fn not_found() -> content::RawJson<String> {
    let json = json!({ "msg": "Not Found" });
    content::RawJson(json.to_string())
}

#[catch(500)]
fn internal_error() -> content::RawJson<String> {
    let json = json!({ "msg": "internal server error" });
    content::RawJson(json.to_string())
}

pub fn server(pool: db::Pool) -> Rocket<Build> {
    rocket::build()
        .manage(pool)
        .mount("/api", routes![catalog::describe])
        .mount("/api/topics", routes![topic::list])
        .mount(
            "/api/articles",
            routes![
                article::list,
                article::get,
                article::get_invalid,
                article::update_votes,
                article::update_votes_invalid,
                comment::list,
                comment::list_invalid,
                comment::add,
                comment::add_invalid,
            ],
        )
        .mount(
            "/api/comments",
            routes![comment::delete, comment::delete_invalid],
        )
        .mount("/api/users", routes![user::list])
        .register("/", catchers![not_found, internal_error])
}
