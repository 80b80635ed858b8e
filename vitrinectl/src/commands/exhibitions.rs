use anyhow::{Context, Result};
use vitrine_core::{
    ArtworkRef, ExhibitionId, ExhibitionPatch, NewExhibition,
};

use super::{Client, settle};
use crate::cli::ExhibitionCommand;
use crate::output;

fn artwork_ref(source: &str, artwork_id: &str) -> Result<ArtworkRef> {
    Ok(ArtworkRef {
        source: source.parse()?,
        artwork_id: artwork_id.parse()?,
    })
}

impl Client {
    pub async fn exhibitions(
        &self,
        command: ExhibitionCommand,
        json: bool,
    ) -> Result<()> {
        let repo = &self.exhibitions;
        match command {
            ExhibitionCommand::List => {
                let all = settle(repo.list().await)
                    .context("failed to list exhibitions")?;
                output::exhibitions(&all, json)
            }
            ExhibitionCommand::Show { id } => {
                let id: ExhibitionId = id.parse()?;
                let exhibition = settle(repo.get(id).await)
                    .with_context(|| {
                        format!("failed to fetch exhibition {id}")
                    })?;
                output::exhibition(&exhibition, json)
            }
            ExhibitionCommand::Create { name, description } => {
                let created = settle(
                    repo.create(&NewExhibition { name, description }).await,
                )
                .context("failed to create exhibition")?;
                output::exhibition(&created, json)
            }
            ExhibitionCommand::Update {
                id,
                name,
                description,
            } => {
                let id: ExhibitionId = id.parse()?;
                let patch = ExhibitionPatch { name, description };
                let updated = settle(repo.update(id, &patch).await)
                    .with_context(|| {
                        format!("failed to update exhibition {id}")
                    })?;
                output::exhibition(&updated, json)
            }
            ExhibitionCommand::Add {
                id,
                source,
                artwork_id,
            } => {
                let id: ExhibitionId = id.parse()?;
                let artwork = artwork_ref(&source, &artwork_id)?;
                let updated = settle(repo.add_artwork(id, &artwork).await)
                    .with_context(|| {
                        format!("failed to add {source}/{artwork_id} to {id}")
                    })?;
                output::exhibition(&updated, json)
            }
            ExhibitionCommand::Remove {
                id,
                source,
                artwork_id,
            } => {
                let id: ExhibitionId = id.parse()?;
                let artwork = artwork_ref(&source, &artwork_id)?;
                settle(repo.remove_artwork(id, &artwork).await).with_context(
                    || {
                        format!(
                            "failed to remove {source}/{artwork_id} from {id}"
                        )
                    },
                )?;
                println!("Removed {source}/{artwork_id} from {id}");
                Ok(())
            }
            ExhibitionCommand::Delete { id } => {
                let id: ExhibitionId = id.parse()?;
                settle(repo.delete(id).await)
                    .with_context(|| {
                        format!("failed to delete exhibition {id}")
                    })?;
                println!("Deleted exhibition {id}");
                Ok(())
            }
        }
    }
}
