use std::sync::Arc;

use tracing::debug;
use vitrine_contracts::prelude::ExhibitionEndpoint;
use vitrine_model::prelude::{
    ArtworkRef, Exhibition, ExhibitionId, ExhibitionPatch, NewExhibition,
};

use crate::network::{
    Expect, NETWORK_TARGET, NetworkResult, classify, classify_no_content,
    log_outcome,
};

/// CRUD access to user-curated exhibitions.
///
/// Input that can never succeed (a blank name, an empty patch) is rejected
/// locally without a round trip; such rejections carry no status code.
#[derive(Debug, Clone)]
pub struct ExhibitionRepository {
    endpoint: Arc<dyn ExhibitionEndpoint>,
}

impl ExhibitionRepository {
    pub fn new(endpoint: Arc<dyn ExhibitionEndpoint>) -> Self {
        Self { endpoint }
    }

    pub async fn list(&self) -> NetworkResult<Vec<Exhibition>> {
        let outcome = self.endpoint.list_exhibitions().await;

        let result = classify(outcome, Expect::Ok);
        log_outcome("list_exhibitions", &result);
        result
    }

    pub async fn get(&self, id: ExhibitionId) -> NetworkResult<Exhibition> {
        debug!(target: NETWORK_TARGET, %id, "fetching exhibition");
        let outcome = self.endpoint.fetch_exhibition(id).await;

        let result = classify(outcome, Expect::Ok);
        log_outcome("fetch_exhibition", &result);
        result
    }

    pub async fn create(
        &self,
        exhibition: &NewExhibition,
    ) -> NetworkResult<Exhibition> {
        const OPERATION: &str = "create_exhibition";
        if exhibition.name.trim().is_empty() {
            return reject_locally(OPERATION, BLANK_NAME);
        }

        let outcome = self.endpoint.create_exhibition(exhibition).await;

        let result = classify(outcome, Expect::Created);
        log_outcome(OPERATION, &result);
        result
    }

    pub async fn update(
        &self,
        id: ExhibitionId,
        patch: &ExhibitionPatch,
    ) -> NetworkResult<Exhibition> {
        const OPERATION: &str = "update_exhibition";
        if patch.is_empty() {
            return reject_locally(
                OPERATION,
                "exhibition update has no changes",
            );
        }
        if patch
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return reject_locally(OPERATION, BLANK_NAME);
        }

        debug!(target: NETWORK_TARGET, %id, "updating exhibition");
        let outcome = self.endpoint.update_exhibition(id, patch).await;

        let result = classify(outcome, Expect::Ok);
        log_outcome(OPERATION, &result);
        result
    }

    pub async fn add_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> NetworkResult<Exhibition> {
        debug!(
            target: NETWORK_TARGET,
            %id,
            source = %artwork.source,
            artwork_id = %artwork.artwork_id,
            "adding artwork to exhibition"
        );
        let outcome = self.endpoint.add_artwork(id, artwork).await;

        let result = classify(outcome, Expect::Created);
        log_outcome("add_exhibition_artwork", &result);
        result
    }

    pub async fn remove_artwork(
        &self,
        id: ExhibitionId,
        artwork: &ArtworkRef,
    ) -> NetworkResult<()> {
        debug!(
            target: NETWORK_TARGET,
            %id,
            source = %artwork.source,
            artwork_id = %artwork.artwork_id,
            "removing artwork from exhibition"
        );
        let outcome = self.endpoint.remove_artwork(id, artwork).await;

        let result = classify_no_content(outcome);
        log_outcome("remove_exhibition_artwork", &result);
        result
    }

    pub async fn delete(&self, id: ExhibitionId) -> NetworkResult<()> {
        debug!(target: NETWORK_TARGET, %id, "deleting exhibition");
        let outcome = self.endpoint.delete_exhibition(id).await;

        let result = classify_no_content(outcome);
        log_outcome("delete_exhibition", &result);
        result
    }
}

const BLANK_NAME: &str = "exhibition name must not be blank";

fn reject_locally<T>(
    operation: &'static str,
    message: &str,
) -> NetworkResult<T> {
    let result = NetworkResult::rejected(None, message);
    log_outcome(operation, &result);
    result
}
