//! Show listings and booking.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

use fyyur_db::entities::{artist, show, venue};

use crate::error::{DirectoryError, Result};
use crate::forms::{ShowDefaults, ShowForm};
use crate::store;
use crate::timeline::Timestamp;
use crate::views::ShowListing;

/// Every show joined with its venue and artist names.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<ShowListing>> {
    let rows = show::Entity::find()
        .order_by_asc(show::Column::Id)
        .find_also_related(venue::Entity)
        .all(db)
        .await
        .map_err(|e| store::persistence_failed("list shows", e))?;

    // Batch-fetch artists
    let mut artist_ids: Vec<i32> = rows.iter().map(|(s, _)| s.artist_id).collect();
    artist_ids.sort_unstable();
    artist_ids.dedup();
    let mut artists: HashMap<i32, artist::Model> = HashMap::with_capacity(artist_ids.len());
    for ids in artist_ids.chunks(store::ID_BATCH) {
        let batch = artist::Entity::find()
            .filter(artist::Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await
            .map_err(|e| store::persistence_failed("load show artists", e))?;
        artists.extend(batch.into_iter().map(|a| (a.id, a)));
    }

    rows.into_iter()
        .map(|(s, v)| -> Result<ShowListing> {
            let v = v.ok_or_else(|| DirectoryError::venue_not_found(s.venue_id))?;
            let a = artists
                .get(&s.artist_id)
                .ok_or_else(|| DirectoryError::artist_not_found(s.artist_id))?;
            Ok(ShowListing {
                id: s.id,
                venue_id: v.id,
                venue_name: v.name,
                artist_id: a.id,
                artist_name: a.name.clone(),
                artist_image_link: a.image_link.clone(),
                start_time: s.start_time,
            })
        })
        .collect()
}

/// Lists a show without checking that its artist and venue exist; the
/// store's foreign keys reject dangling ids.
pub async fn create(db: &DatabaseConnection, form: ShowForm) -> Result<show::Model> {
    let fields = form.validate()?;

    let created = store::in_transaction(db, "create show", move |txn| {
        Box::pin(async move {
            let active = show::ActiveModel {
                venue_id: Set(fields.venue_id),
                artist_id: Set(fields.artist_id),
                start_time: Set(fields.start_time),
                ..Default::default()
            };
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(
        show_id = created.id,
        venue_id = created.venue_id,
        artist_id = created.artist_id,
        "show listed"
    );
    Ok(created)
}

pub fn defaults(now: &Timestamp) -> ShowDefaults {
    ShowDefaults { start_time: *now }
}
