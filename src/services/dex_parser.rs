use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::LivingDexSummary;

/// Stored dex payload, as serialized into living_dexes.data.
///
/// Unknown fields are ignored so older payload revisions keep parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDex {
    game_set_id: Option<String>,
    preset_id: Option<String>,
    #[serde(default)]
    boxes: Vec<StoredBox>,
}

#[derive(Debug, Deserialize)]
struct StoredBox {
    #[serde(default)]
    shiny: bool,
    #[serde(default)]
    pokemon: Vec<Option<StoredSlot>>, // null entries are empty slots
}

#[derive(Debug, Deserialize)]
struct StoredSlot {
    #[serde(default)]
    caught: bool,
}

/// Per-dex metadata derived from the stored payload: caught and total
/// counts split by shiny status, plus box tallies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexMetadata {
    pub id: Uuid,
    pub title: String,
    pub game_id: String,
    pub game_set_id: Option<String>,
    pub preset_id: Option<String>,
    pub caught_regular: u32,
    pub total_regular: u32,
    pub caught_shiny: u32,
    pub total_shiny: u32,
    pub total_boxes: u32,
    pub total_regular_boxes: u32,
    pub total_shiny_boxes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projects a dex summary plus its raw payload into [`DexMetadata`].
///
/// A missing or unparseable payload yields zeroed counts and null preset
/// information instead of an error; one bad record must never take down
/// the response it is part of.
pub fn dex_metadata(summary: &LivingDexSummary, payload: Option<&str>) -> DexMetadata {
    let mut metadata = zeroed_metadata(summary);

    let dex = match payload.map(serde_json::from_str::<StoredDex>) {
        Some(Ok(dex)) => dex,
        Some(Err(e)) => {
            tracing::debug!(dex_id = %summary.id, error = %e, "Unparseable dex payload, zeroing counts");
            return metadata;
        }
        None => return metadata,
    };

    metadata.game_set_id = dex.game_set_id;
    metadata.preset_id = dex.preset_id;
    metadata.total_boxes = dex.boxes.len() as u32;

    for dex_box in &dex.boxes {
        let slots = dex_box.pokemon.iter().flatten().count() as u32;
        let caught = dex_box
            .pokemon
            .iter()
            .flatten()
            .filter(|slot| slot.caught)
            .count() as u32;

        if dex_box.shiny {
            metadata.total_shiny += slots;
            metadata.caught_shiny += caught;
            metadata.total_shiny_boxes += 1;
        } else {
            metadata.total_regular += slots;
            metadata.caught_regular += caught;
            metadata.total_regular_boxes += 1;
        }
    }

    metadata
}

fn zeroed_metadata(summary: &LivingDexSummary) -> DexMetadata {
    DexMetadata {
        id: summary.id,
        title: summary.title.clone(),
        game_id: summary.game_id.clone(),
        game_set_id: None,
        preset_id: None,
        caught_regular: 0,
        total_regular: 0,
        caught_shiny: 0,
        total_shiny: 0,
        total_boxes: 0,
        total_regular_boxes: 0,
        total_shiny_boxes: 0,
        created_at: summary.created_at,
        updated_at: summary.updated_at,
    }
}
