use axum::extract::{Extension, Json};

use crate::api::QuoteAPI;
use crate::entities::{PricingRequest, Quote};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<PricingRequest>,
) -> Result<Json<Quote>, Error> {
    let quote = api.create_quote(request).await?;

    Ok(quote.into())
}
