use crate::article::Article;
use crate::db::schema::comments;
use crate::db::DbConnection;
use crate::types::{ApiError, ApiResult, Validate};
use crate::utils::serialize_date;
use chrono::{DateTime, Utc};
use diesel::delete as diesel_delete;
use diesel::insert_into;
use diesel::prelude::*;
use rocket::http::Status;
use rocket::response::status::NoContent;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Queryable, Serialize)]
pub struct Comment {
    comment_id: i32,
    article_id: i32,
    author: String,
    body: String,
    #[serde(serialize_with = "serialize_date")]
    created_at: DateTime<Utc>,
    votes: i32,
}

// created_at and votes come from the table defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
struct NewComment {
    article_id: i32,
    author: String,
    body: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    username: Option<String>,
    body: Option<String>,
}

impl Validate for CommentPayload {
    type Error = ApiError;
    fn validate(self) -> Result<Self, ApiError> {
        let present = |field: &Option<String>| {
            field
                .as_ref()
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
        };
        if present(&self.username) && present(&self.body) {
            Ok(self)
        } else {
            Err(ApiError::bad_request())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    comments: Vec<Comment>,
}

#[get("/<article_id>/comments")]
pub fn list(mut conn: DbConnection, article_id: i32) -> ApiResult<CommentsResponse> {
    use crate::db::schema::comments::dsl as comments_dsl;

    Article::load(article_id, &mut conn)?;
    let comments = comments_dsl::comments
        .filter(comments_dsl::article_id.eq(article_id))
        .order(comments_dsl::created_at.desc())
        .load::<Comment>(&mut *conn)?;

    Ok(Json(CommentsResponse { comments }))
}

#[get("/<_article_id>/comments", rank = 2)]
pub fn list_invalid(_article_id: &str) -> ApiError {
    ApiError::bad_request()
}

#[post("/<article_id>/comments", format = "application/json", data = "<payload>")]
pub fn add(
    mut conn: DbConnection,
    article_id: i32,
    payload: Option<Json<CommentPayload>>,
) -> Result<(Status, Json<CommentResponse>), ApiError> {
    let payload = payload
        .ok_or_else(ApiError::bad_request)?
        .validate()?
        .into_inner();
    let article = Article::load(article_id, &mut conn)?;

    // The author column still carries a foreign key to users; an unknown
    // username surfaces as a ForeignKeyViolation and normalizes to 400.
    let new_comment = NewComment {
        article_id: article.article_id,
        author: payload.username.unwrap_or_default(),
        body: payload.body.unwrap_or_default(),
    };
    let comment = insert_into(comments::table)
        .values(&new_comment)
        .get_result::<Comment>(&mut *conn)?;

    Ok((Status::Created, Json(CommentResponse { comment })))
}

#[post("/<_article_id>/comments", rank = 2)]
pub fn add_invalid(_article_id: &str) -> ApiError {
    ApiError::bad_request()
}

#[delete("/<comment_id>")]
pub fn delete(mut conn: DbConnection, comment_id: i32) -> Result<NoContent, ApiError> {
    use crate::db::schema::comments::dsl as comments_dsl;

    let deleted = diesel_delete(comments_dsl::comments.find(comment_id)).execute(&mut *conn)?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }
    Ok(NoContent)
}

#[delete("/<_comment_id>", rank = 2)]
pub fn delete_invalid(_comment_id: &str) -> ApiError {
    ApiError::bad_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(username: Option<&str>, body: Option<&str>) -> CommentPayload {
        CommentPayload {
            username: username.map(String::from),
            body: body.map(String::from),
        }
    }

    #[test]
    fn complete_payloads_validate() {
        assert!(payload(Some("butter_bridge"), Some("nice article")).validate().is_ok());
    }

    #[test]
    fn missing_fields_are_bad_requests() {
        assert_eq!(
            payload(None, Some("nice article")).validate().unwrap_err(),
            ApiError::bad_request()
        );
        assert_eq!(
            payload(Some("butter_bridge"), None).validate().unwrap_err(),
            ApiError::bad_request()
        );
        assert_eq!(payload(None, None).validate().unwrap_err(), ApiError::bad_request());
    }

    #[test]
    fn whitespace_only_fields_are_bad_requests() {
        assert_eq!(
            payload(Some("butter_bridge"), Some("   ")).validate().unwrap_err(),
            ApiError::bad_request()
        );
    }
}
