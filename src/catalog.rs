use rocket::serde::json::Json;
use serde_json::{json, Value};

lazy_static! {
    /// Static description of the HTTP surface, served from `GET /api`.
    static ref ENDPOINTS: Value = json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "GET /api/articles": {
            "description": "serves an array of all articles, each with its comment_count",
            "queries": ["topic", "sort_by", "order"],
            "exampleResponse": {
                "articles": [
                    {
                        "article_id": 1,
                        "title": "Seafood substitutions are increasing",
                        "topic": "cooking",
                        "author": "weegembump",
                        "created_at": "2018-05-30T15:59:13.341Z",
                        "votes": 0,
                        "article_img_url": "https://images.example.com/seafood.jpg",
                        "comment_count": 6
                    }
                ]
            }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article by its id",
            "queries": [],
            "exampleResponse": {
                "article": {
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "https://images.example.com/seafood.jpg"
                }
            }
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves the comments for an article, most recent first",
            "queries": [],
            "exampleResponse": {
                "comments": [
                    {
                        "comment_id": 16,
                        "article_id": 6,
                        "author": "butter_bridge",
                        "body": "This is a bad article name",
                        "created_at": "2020-10-11T15:23:00.000Z",
                        "votes": 1
                    }
                ]
            }
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to an article",
            "queries": [],
            "exampleRequest": { "username": "butter_bridge", "body": "Great read." },
            "exampleResponse": {
                "comment": {
                    "comment_id": 19,
                    "article_id": 6,
                    "author": "butter_bridge",
                    "body": "Great read.",
                    "created_at": "2020-10-11T15:23:00.000Z",
                    "votes": 0
                }
            }
        },
        "PATCH /api/articles/:article_id": {
            "description": "applies a signed vote delta to an article and serves the updated article",
            "queries": [],
            "exampleRequest": { "inc_votes": -75 },
            "exampleResponse": {
                "article": {
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 25,
                    "article_img_url": "https://images.example.com/seafood.jpg"
                }
            }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment by its id",
            "queries": [],
            "exampleResponse": {}
        },
        "GET /api/users": {
            "description": "serves an array of all users",
            "queries": [],
            "exampleResponse": {
                "users": [
                    {
                        "username": "butter_bridge",
                        "name": "jonny",
                        "avatar_url": "https://avatars.example.com/butter_bridge.jpg"
                    }
                ]
            }
        }
    });
}

#[get("/")]
pub fn describe() -> Json<Value> {
    Json(json!({ "endpoints": &*ENDPOINTS }))
}
