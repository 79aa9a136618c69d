use axum::extract::Query;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct HomeQuery {
    pub name: String,
}

/// handler function for the greeting
pub async fn home(Query(query): Query<HomeQuery>) -> String {
    format!("hello,{}", query.name)
}
