#[macro_use]
extern crate rocket;

use newswire::db;
use rocket::{Build, Rocket};

#[launch]
fn rocket() -> Rocket<Build> {
    let pool = db::init_pool().expect("Failed to create database pool");
    newswire::server(pool)
}
