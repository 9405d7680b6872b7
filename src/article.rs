use crate::db::DbConnection;
use crate::types::{ApiError, ApiResult};
use crate::utils::serialize_date;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Integer, Text, Timestamptz};
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

/// Columns a client may sort the listing by. The resolved column name is
/// interpolated into the query, so nothing outside this list ever reaches
/// the SQL text.
const SORTABLE_COLUMNS: &[&str] = &[
    "article_id",
    "title",
    "author",
    "topic",
    "created_at",
    "votes",
    "article_img_url",
];

const ORDERS: &[&str] = &["asc", "desc"];

static SELECT_LISTED_ARTICLES: &str = "select articles.article_id as article_id,
       articles.title as title,
       articles.topic as topic,
       articles.author as author,
       articles.created_at as created_at,
       articles.votes as votes,
       articles.article_img_url as article_img_url,
       CAST(count(comments.comment_id) AS INTEGER) as comment_count
  from articles LEFT JOIN comments on comments.article_id = articles.article_id";

#[derive(Debug, Queryable, Serialize)]
pub struct Article {
    pub article_id: i32,
    title: String,
    topic: String,
    author: String,
    body: String,
    #[serde(serialize_with = "serialize_date")]
    created_at: DateTime<Utc>,
    votes: i32,
    article_img_url: String,
}

/// A listing row: no body, but a derived comment count from the left join.
#[derive(Debug, QueryableByName, Serialize)]
pub struct ListedArticle {
    #[diesel(sql_type = Integer)]
    article_id: i32,
    #[diesel(sql_type = Text)]
    title: String,
    #[diesel(sql_type = Text)]
    topic: String,
    #[diesel(sql_type = Text)]
    author: String,
    #[diesel(sql_type = Timestamptz)]
    #[serde(serialize_with = "serialize_date")]
    created_at: DateTime<Utc>,
    #[diesel(sql_type = Integer)]
    votes: i32,
    #[diesel(sql_type = Text)]
    article_img_url: String,
    #[diesel(sql_type = Integer)]
    comment_count: i32,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    article: Article,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    articles: Vec<ListedArticle>,
}

#[derive(Debug, Deserialize)]
pub struct VotesPatch {
    inc_votes: i32,
}

impl Article {
    pub fn load(article_id_: i32, connection: &mut PgConnection) -> Result<Article, ApiError> {
        use crate::db::schema::articles::dsl::*;
        articles
            .find(article_id_)
            .get_result::<Article>(connection)
            .optional()?
            .ok_or_else(|| ApiError::article_not_found(article_id_))
    }
}

/// Assembles the listing query. `sort_by` and `order` are checked against
/// the whitelists before they are interpolated; the topic value itself is
/// always a bound parameter.
pub fn build_listing_sql(
    filter_by_topic: bool,
    sort_by: &str,
    order: &str,
) -> Result<String, ApiError> {
    if !SORTABLE_COLUMNS.contains(&sort_by) || !ORDERS.contains(&order) {
        return Err(ApiError::BadRequest(
            "Invalid sort_by or order query".to_string(),
        ));
    }

    let mut sql = String::from(SELECT_LISTED_ARTICLES);
    if filter_by_topic {
        sql.push_str("\n where articles.topic = $1");
    }
    sql.push_str("\n group by articles.article_id");
    sql.push_str(&format!("\n order by articles.{} {};", sort_by, order));
    Ok(sql)
}

#[get("/?<topic>&<sort_by>&<order>")]
pub fn list(
    mut conn: DbConnection,
    topic: Option<&str>,
    sort_by: Option<&str>,
    order: Option<&str>,
) -> ApiResult<ArticlesResponse> {
    let sql = build_listing_sql(
        topic.is_some(),
        sort_by.unwrap_or("created_at"),
        order.unwrap_or("desc"),
    )?;

    let articles = match topic {
        Some(topic) => sql_query(sql)
            .bind::<Text, _>(topic)
            .get_results::<ListedArticle>(&mut *conn)?,
        None => sql_query(sql).get_results::<ListedArticle>(&mut *conn)?,
    };

    Ok(Json(ArticlesResponse { articles }))
}

#[get("/<article_id>")]
pub fn get(mut conn: DbConnection, article_id: i32) -> ApiResult<ArticleResponse> {
    let article = Article::load(article_id, &mut conn)?;
    Ok(Json(ArticleResponse { article }))
}

#[get("/<_article_id>", rank = 2)]
pub fn get_invalid(_article_id: &str) -> ApiError {
    ApiError::bad_request()
}

// votes = votes + delta runs as one statement, so concurrent patches never
// lose increments.
#[patch("/<article_id>", format = "application/json", data = "<patch>")]
pub fn update_votes(
    mut conn: DbConnection,
    article_id: i32,
    patch: Option<Json<VotesPatch>>,
) -> ApiResult<ArticleResponse> {
    use crate::db::schema::articles::dsl as articles_dsl;

    let delta = patch.ok_or_else(ApiError::bad_request)?.into_inner().inc_votes;
    let article = diesel::update(articles_dsl::articles.find(article_id))
        .set(articles_dsl::votes.eq(articles_dsl::votes + delta))
        .get_result::<Article>(&mut *conn)
        .optional()?
        .ok_or_else(|| ApiError::article_not_found(article_id))?;

    Ok(Json(ArticleResponse { article }))
}

#[patch("/<_article_id>", rank = 2)]
pub fn update_votes_invalid(_article_id: &str) -> ApiError {
    ApiError::bad_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_whitelisted_column_and_order_is_accepted() {
        for column in SORTABLE_COLUMNS {
            for order in ORDERS {
                let sql = build_listing_sql(false, column, order).unwrap();
                assert!(
                    sql.ends_with(&format!("order by articles.{} {};", column, order)),
                    "unexpected tail for {} {}: {}",
                    column,
                    order,
                    sql
                );
            }
        }
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let err = build_listing_sql(false, "body", "desc").unwrap_err();
        assert_eq!(
            err,
            ApiError::BadRequest("Invalid sort_by or order query".to_string())
        );
    }

    #[test]
    fn unknown_order_is_rejected() {
        let err = build_listing_sql(false, "votes", "sideways").unwrap_err();
        assert_eq!(
            err,
            ApiError::BadRequest("Invalid sort_by or order query".to_string())
        );
    }

    #[test]
    fn injection_attempts_never_reach_the_sql_text() {
        assert!(build_listing_sql(false, "votes; drop table articles", "desc").is_err());
        assert!(build_listing_sql(false, "votes", "desc; drop table articles").is_err());
        assert!(build_listing_sql(false, "ASC", "desc").is_err());
    }

    #[test]
    fn topic_filter_is_a_bound_parameter() {
        let filtered = build_listing_sql(true, "created_at", "desc").unwrap();
        assert!(filtered.contains("where articles.topic = $1"));

        let unfiltered = build_listing_sql(false, "created_at", "desc").unwrap();
        assert!(!unfiltered.contains("where"));
    }

    #[test]
    fn listing_always_groups_and_counts_comments() {
        let sql = build_listing_sql(false, "created_at", "desc").unwrap();
        assert!(sql.contains("CAST(count(comments.comment_id) AS INTEGER) as comment_count"));
        assert!(sql.contains("LEFT JOIN comments"));
        assert!(sql.contains("group by articles.article_id"));
    }
}
