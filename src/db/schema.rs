diesel::table! {
    topics (slug) {
        slug -> Text,
        description -> Text,
    }
}

diesel::table! {
    articles (article_id) {
        article_id -> Int4,
        title -> Text,
        topic -> Text,
        author -> Text,
        body -> Text,
        created_at -> Timestamptz,
        votes -> Int4,
        article_img_url -> Text,
    }
}

diesel::table! {
    comments (comment_id) {
        comment_id -> Int4,
        article_id -> Int4,
        author -> Text,
        body -> Text,
        created_at -> Timestamptz,
        votes -> Int4,
    }
}

diesel::table! {
    users (username) {
        username -> Text,
        name -> Text,
        avatar_url -> Text,
    }
}

diesel::joinable!(comments -> articles (article_id));

diesel::allow_tables_to_appear_in_same_query!(articles, comments);
