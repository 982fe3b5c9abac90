pub mod auth;
pub mod health;
pub mod pages;

use axum::{extract::Query, http::Uri};
use serde::de::DeserializeOwned;

/// Malformed query strings are treated as empty rather than rejected
pub(crate) fn query_or_default<T: DeserializeOwned + Default>(uri: &Uri) -> T {
    Query::<T>::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default()
}
