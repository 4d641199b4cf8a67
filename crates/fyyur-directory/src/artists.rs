//! Artist listings, search, detail pages and edits.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use fyyur_db::entities::{artist, show, venue};

use crate::error::{DirectoryError, Result};
use crate::forms::{ArtistFields, ArtistForm};
use crate::store::{self, ShowOwner};
use crate::timeline::{self, Timestamp};
use crate::views::{ArtistDetail, ArtistListItem, ArtistShow, ListingSummary, SearchResults};

/// Every artist by id, without aggregation.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<ArtistListItem>> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await
        .map_err(|e| store::persistence_failed("list artists", e))?;

    Ok(artists
        .into_iter()
        .map(|a| ArtistListItem {
            id: a.id,
            name: a.name,
        })
        .collect())
}

/// Artists whose name contains `term`, ignoring case.
pub async fn search(
    db: &DatabaseConnection,
    term: &str,
    now: &Timestamp,
) -> Result<SearchResults<ListingSummary>> {
    let artists = store::search_by_name(
        db,
        artist::Entity::find().order_by_asc(artist::Column::Id),
        artist::Column::Name,
        term,
        |row| row.name.as_str(),
        "search artists",
    )
    .await?;

    let ids = artists.iter().map(|a| a.id).collect();
    let upcoming = store::upcoming_counts(db, ShowOwner::Artist, ids, now).await?;

    Ok(SearchResults::from(
        artists
            .into_iter()
            .map(|a| ListingSummary {
                num_upcoming_shows: upcoming.get(&a.id).copied().unwrap_or(0),
                id: a.id,
                name: a.name,
            })
            .collect::<Vec<_>>(),
    ))
}

/// The artist page: attributes plus the venues they play, past and upcoming.
pub async fn get_detail(db: &DatabaseConnection, id: i32, now: &Timestamp) -> Result<ArtistDetail> {
    let artist_model = find(db, id).await?;

    let rows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::Id)
        .find_also_related(venue::Entity)
        .all(db)
        .await
        .map_err(|e| store::persistence_failed("load artist shows", e))?;

    let shows = rows
        .into_iter()
        .map(|(s, v)| -> Result<ArtistShow> {
            let v = v.ok_or_else(|| DirectoryError::venue_not_found(s.venue_id))?;
            Ok(ArtistShow {
                venue_id: v.id,
                venue_name: v.name,
                venue_image_link: v.image_link,
                start_time: s.start_time,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let split = timeline::partition(shows, now, |s| &s.start_time);
    Ok(ArtistDetail::new(artist_model, split.past, split.upcoming))
}

pub async fn get_for_edit(db: &DatabaseConnection, id: i32) -> Result<ArtistForm> {
    find(db, id).await.map(ArtistForm::from)
}

pub async fn create(db: &DatabaseConnection, form: ArtistForm) -> Result<artist::Model> {
    let fields = form.validate()?;

    let created = store::in_transaction(db, "create artist", move |txn| {
        Box::pin(async move {
            let mut active: artist::ActiveModel = Default::default();
            apply(&mut active, fields);
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(artist_id = created.id, name = %created.name, "artist listed");
    Ok(created)
}

/// Overwrites every field of an existing artist.
pub async fn update(db: &DatabaseConnection, id: i32, form: ArtistForm) -> Result<artist::Model> {
    let fields = form.validate()?;

    let updated = store::in_transaction(db, "update artist", move |txn| {
        Box::pin(async move {
            let existing = artist::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or_else(|| DirectoryError::artist_not_found(id))?;
            let mut active: artist::ActiveModel = existing.into();
            apply(&mut active, fields);
            Ok(active.update(txn).await?)
        })
    })
    .await?;

    tracing::info!(artist_id = updated.id, "artist edited");
    Ok(updated)
}

async fn find(db: &DatabaseConnection, id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| store::persistence_failed("load artist", e))?
        .ok_or_else(|| DirectoryError::artist_not_found(id))
}

fn apply(active: &mut artist::ActiveModel, fields: ArtistFields) {
    active.name = Set(fields.name);
    active.city = Set(fields.city);
    active.state = Set(fields.state);
    active.phone = Set(fields.phone);
    active.genres = Set(fields.genres);
    active.website_link = Set(fields.website_link);
    active.facebook_link = Set(fields.facebook_link);
    active.image_link = Set(fields.image_link);
    active.seeking_venue = Set(fields.seeking_venue);
    active.seeking_description = Set(fields.seeking_description);
}
