use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Row shape of the `sorteio` collection. Participants reference their
/// campaign by name (`sorteio_nome`), not by id, and are never mutated or
/// deleted through this console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub nome: String,
    pub telefone: String,
    pub account_id: i64,
    pub sorteio_nome: String,
    pub created_at: DateTime<Utc>,
    /// Assigned exactly once at creation, uniform in [0, 10_000_000).
    pub numero_sorte: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NewParticipantRow {
    pub nome: String,
    pub telefone: String,
    pub sorteio_nome: String,
    pub account_id: i64,
    pub numero_sorte: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateParticipantRequest {
    pub nome: String,
    pub telefone: String,
    pub sorteio_nome: String,
    #[serde(default = "default_account_id")]
    pub account_id: i64,
}

fn default_account_id() -> i64 {
    1
}
