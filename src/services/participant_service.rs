use std::sync::Arc;

use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::{CreateParticipantRequest, NewParticipantRow, Participant};
use crate::store::{PARTICIPANTS, SupabaseStore};

/// Lucky numbers are drawn uniformly from [0, 10_000_000).
const LUCKY_NUMBER_BOUND: i64 = 10_000_000;

#[derive(Clone)]
pub struct ParticipantService {
    store: Arc<SupabaseStore>,
}

impl ParticipantService {
    pub fn new(store: Arc<SupabaseStore>) -> Self {
        Self { store }
    }

    /// All entries of one campaign, newest first. The campaign name is the
    /// linkage key; renaming a campaign would orphan its participants.
    pub async fn list_by_campaign(&self, sorteio_nome: &str) -> AppResult<Vec<Participant>> {
        self.store
            .list(
                PARTICIPANTS,
                &[("sorteio_nome", sorteio_nome.to_string())],
            )
            .await
    }

    /// Register one entry. The lucky number is assigned here, exactly
    /// once; it is never recomputed afterwards.
    pub async fn create(&self, req: &CreateParticipantRequest) -> AppResult<Participant> {
        if req.nome.trim().is_empty()
            || req.telefone.trim().is_empty()
            || req.sorteio_nome.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Name, phone and campaign are required".to_string(),
            ));
        }

        let numero_sorte = rand::thread_rng().gen_range(0..LUCKY_NUMBER_BOUND);

        self.store
            .insert(
                PARTICIPANTS,
                &NewParticipantRow {
                    nome: req.nome.clone(),
                    telefone: req.telefone.clone(),
                    sorteio_nome: req.sorteio_nome.clone(),
                    account_id: req.account_id,
                    numero_sorte,
                },
            )
            .await
    }
}
