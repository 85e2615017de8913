use axum::extract::{Extension, Json};

use crate::api::QuoteAPI;
use crate::pricing::Tariff;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Json<Tariff> {
    api.tariff().into()
}

pub async fn health() -> &'static str {
    "ok"
}
