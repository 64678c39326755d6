use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Card as returned by the API.
#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDoc {
    pub id: Uuid,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
}

/// Create/update body. An `id` field, if sent, is ignored.
#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInputDoc {
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::cards::list,
        crate::cards::get,
        crate::cards::create,
        crate::cards::update,
        crate::cards::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CardDoc,
            CardInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cards")
    )
)]
pub struct ApiDoc;
