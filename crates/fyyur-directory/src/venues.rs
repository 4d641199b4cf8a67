//! Venue listings, search, detail pages and writes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use fyyur_db::entities::{artist, show, venue};

use crate::error::{DirectoryError, Result};
use crate::forms::{VenueFields, VenueForm, WriteMode};
use crate::locations::group_by_location;
use crate::store::{self, ShowOwner};
use crate::timeline::{self, Timestamp};
use crate::views::{ListingSummary, LocationGroup, SearchResults, VenueDetail, VenueShow};

/// Every venue with its upcoming-show count, grouped by `(city, state)`.
pub async fn list_grouped_by_location(
    db: &DatabaseConnection,
    now: &Timestamp,
) -> Result<Vec<LocationGroup>> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await
        .map_err(|e| store::persistence_failed("list venues", e))?;

    let ids = venues.iter().map(|v| v.id).collect();
    let upcoming = store::upcoming_counts(db, ShowOwner::Venue, ids, now).await?;

    Ok(group_by_location(venues.into_iter().map(|v| {
        let summary = ListingSummary {
            id: v.id,
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
            name: v.name,
        };
        (v.city, v.state, summary)
    })))
}

/// Venues whose name contains `term`, ignoring case.
pub async fn search(
    db: &DatabaseConnection,
    term: &str,
    now: &Timestamp,
) -> Result<SearchResults<ListingSummary>> {
    let venues = store::search_by_name(
        db,
        venue::Entity::find().order_by_asc(venue::Column::Id),
        venue::Column::Name,
        term,
        |row| row.name.as_str(),
        "search venues",
    )
    .await?;

    let ids = venues.iter().map(|v| v.id).collect();
    let upcoming = store::upcoming_counts(db, ShowOwner::Venue, ids, now).await?;

    Ok(SearchResults::from(
        venues
            .into_iter()
            .map(|v| ListingSummary {
                num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
                id: v.id,
                name: v.name,
            })
            .collect::<Vec<_>>(),
    ))
}

/// The venue page: attributes plus its shows split into past and upcoming.
pub async fn get_detail(db: &DatabaseConnection, id: i32, now: &Timestamp) -> Result<VenueDetail> {
    let venue_model = find(db, id).await?;

    let rows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::Id)
        .find_also_related(artist::Entity)
        .all(db)
        .await
        .map_err(|e| store::persistence_failed("load venue shows", e))?;

    let shows = rows
        .into_iter()
        .map(|(s, a)| -> Result<VenueShow> {
            let a = a.ok_or_else(|| DirectoryError::artist_not_found(s.artist_id))?;
            Ok(VenueShow {
                artist_id: a.id,
                artist_name: a.name,
                artist_image_link: a.image_link,
                start_time: s.start_time,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let split = timeline::partition(shows, now, |s| &s.start_time);
    Ok(VenueDetail::new(venue_model, split.past, split.upcoming))
}

/// Stored fields of a venue, for pre-filling the edit form.
pub async fn get_for_edit(db: &DatabaseConnection, id: i32) -> Result<VenueForm> {
    find(db, id).await.map(VenueForm::from)
}

pub async fn create(db: &DatabaseConnection, form: VenueForm) -> Result<venue::Model> {
    let fields = form.validate(WriteMode::Create)?;

    let created = store::in_transaction(db, "create venue", move |txn| {
        Box::pin(async move {
            let mut active: venue::ActiveModel = Default::default();
            apply(&mut active, fields);
            Ok(active.insert(txn).await?)
        })
    })
    .await?;

    tracing::info!(venue_id = created.id, name = %created.name, "venue listed");
    Ok(created)
}

/// Overwrites every field of an existing venue.
pub async fn update(db: &DatabaseConnection, id: i32, form: VenueForm) -> Result<venue::Model> {
    let fields = form.validate(WriteMode::Update)?;

    let updated = store::in_transaction(db, "update venue", move |txn| {
        Box::pin(async move {
            let existing = venue::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or_else(|| DirectoryError::venue_not_found(id))?;
            let mut active: venue::ActiveModel = existing.into();
            apply(&mut active, fields);
            Ok(active.update(txn).await?)
        })
    })
    .await?;

    tracing::info!(venue_id = updated.id, "venue edited");
    Ok(updated)
}

/// Deletes a venue together with its shows.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
    store::in_transaction(db, "delete venue", move |txn| {
        Box::pin(async move {
            venue::Entity::find_by_id(id)
                .one(txn)
                .await?
                .ok_or_else(|| DirectoryError::venue_not_found(id))?;
            let removed = show::Entity::delete_many()
                .filter(show::Column::VenueId.eq(id))
                .exec(txn)
                .await?;
            venue::Entity::delete_by_id(id).exec(txn).await?;
            tracing::debug!(venue_id = id, shows = removed.rows_affected, "venue shows removed");
            Ok(())
        })
    })
    .await?;

    tracing::info!(venue_id = id, "venue deleted");
    Ok(())
}

async fn find(db: &DatabaseConnection, id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| store::persistence_failed("load venue", e))?
        .ok_or_else(|| DirectoryError::venue_not_found(id))
}

fn apply(active: &mut venue::ActiveModel, fields: VenueFields) {
    active.name = Set(fields.name);
    active.city = Set(fields.city);
    active.state = Set(fields.state);
    active.address = Set(fields.address);
    active.phone = Set(fields.phone);
    active.genres = Set(fields.genres);
    active.website_link = Set(fields.website_link);
    active.facebook_link = Set(fields.facebook_link);
    active.image_link = Set(fields.image_link);
    active.seeking_talent = Set(fields.seeking_talent);
    active.seeking_description = Set(fields.seeking_description);
}
