#![cfg(feature = "migration")]

mod common;

use std::sync::Arc;

use common::{inactive, movie, series, setup_storage, user};
use content_catalog::entity::ContentType;
use content_catalog::schema::{ContentChanges, EpisodeChanges, NewContent, NewEpisode};
use content_catalog::Storage;
use tokio::task::JoinSet;

fn episode(content_id: i32, season: i32, number: i32) -> NewEpisode {
    NewEpisode {
        content_id,
        title: format!("S{season}E{number}"),
        description: None,
        episode_number: number,
        season_number: season,
        video_url: format!("https://cdn.example.com/{content_id}/{season}/{number}.mp4"),
        thumbnail_url: None,
        duration: Some(42),
    }
}

#[tokio::test]
async fn created_content_has_defaults() {
    let storage = setup_storage().await;

    let created = movie(storage.as_ref(), "X").await;
    let fetched = storage
        .get_content_by_id(created.id)
        .await
        .unwrap()
        .expect("content exists");

    assert_eq!(fetched.title, "X");
    assert_eq!(fetched.content_type, ContentType::Movie);
    assert_eq!(fetched.view_count, 0);
    assert!(fetched.is_active);
    assert!(!fetched.is_featured);
    assert!(fetched.genre.0.is_empty());
}

#[tokio::test]
async fn list_fields_round_trip_through_json_columns() {
    let storage = setup_storage().await;

    let mut data = NewContent::new("Heat", ContentType::Movie);
    data.genre = vec!["Crime".to_string(), "Thriller".to_string()];
    data.cast = vec!["Al Pacino".to_string(), "Robert De Niro".to_string()];
    data.rating = Some(8.3);
    let created = storage.create_content(data).await.unwrap();

    let fetched = storage.get_content_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.genre.0, vec!["Crime", "Thriller"]);
    assert_eq!(fetched.cast.0.len(), 2);
    assert_eq!(fetched.rating, Some(8.3));
}

#[tokio::test]
async fn inactive_content_is_hidden_from_every_listing() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let visible = movie(s, "Visible Movie").await;
    let hidden = inactive(s, "Hidden Movie", true).await;

    let all = s.get_all_content().await.unwrap();
    assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![visible.id]);

    let movies = s.get_content_by_type(ContentType::Movie).await.unwrap();
    assert!(movies.iter().all(|c| c.id != hidden.id));

    let found = s.search_content("movie").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, visible.id);

    assert!(s.get_popular_content().await.unwrap().iter().all(|c| c.is_active));
    assert!(s.get_new_content().await.unwrap().iter().all(|c| c.is_active));
    assert!(s.get_featured_content().await.unwrap().is_none());
    assert!(s.get_content_by_id(hidden.id).await.unwrap().is_none());
}

#[tokio::test]
async fn inactive_content_can_still_be_updated_and_deleted() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    let hidden = inactive(s, "Draft", false).await;

    let updated = s
        .update_content(
            hidden.id,
            ContentChanges {
                title: Some("Published".to_string()),
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("row updated");
    assert_eq!(updated.title, "Published");
    assert!(updated.is_active);
    assert!(updated.updated_at >= hidden.updated_at);

    s.delete_content(hidden.id).await.unwrap();
    assert!(s.get_content_by_id(hidden.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_of_missing_content_returns_none() {
    let storage = setup_storage().await;

    let result = storage
        .update_content(9999, ContentChanges::default())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn listings_filter_and_order() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let first = movie(s, "First").await;
    let show = series(s, "The Show").await;
    let last = movie(s, "Last").await;

    let all = s.get_all_content().await.unwrap();
    assert_eq!(
        all.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![last.id, show.id, first.id]
    );

    let shows = s.get_content_by_type(ContentType::Series).await.unwrap();
    assert_eq!(shows.iter().map(|c| c.id).collect::<Vec<_>>(), vec![show.id]);

    let newest = s.get_new_content().await.unwrap();
    assert_eq!(newest.first().map(|c| c.id), Some(last.id));
}

#[tokio::test]
async fn featured_returns_only_the_newest_featured_item() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let mut older = NewContent::new("Older Feature", ContentType::Movie);
    older.is_featured = true;
    s.create_content(older).await.unwrap();
    movie(s, "Not Featured").await;
    let mut newer = NewContent::new("Newer Feature", ContentType::Series);
    newer.is_featured = true;
    let newer = s.create_content(newer).await.unwrap();

    let featured = s.get_featured_content().await.unwrap().expect("featured");
    assert_eq!(featured.id, newer.id);
}

#[tokio::test]
async fn popular_orders_by_views_and_caps_at_twenty() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let mut ids = Vec::new();
    for i in 0..25 {
        ids.push(movie(s, &format!("Movie {i}")).await.id);
    }
    for _ in 0..3 {
        s.increment_view_count(ids[5]).await.unwrap();
    }
    s.increment_view_count(ids[10]).await.unwrap();

    let popular = s.get_popular_content().await.unwrap();
    assert_eq!(popular.len(), 20);
    assert_eq!(popular[0].id, ids[5]);
    assert_eq!(popular[0].view_count, 3);
    assert_eq!(popular[1].id, ids[10]);

    assert_eq!(s.get_new_content().await.unwrap().len(), 20);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let matrix = movie(s, "The Matrix").await;
    let reloaded = movie(s, "The Matrix Reloaded").await;
    movie(s, "Inception").await;
    movie(s, "100% Cotton").await;

    let found = s.search_content("MATRIX").await.unwrap();
    assert_eq!(
        found.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![reloaded.id, matrix.id]
    );

    assert_eq!(s.search_content("trix rel").await.unwrap().len(), 1);
    assert_eq!(s.search_content("%").await.unwrap().len(), 1);
    assert!(s.search_content("_atrix").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_accented_titles() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    let noir = movie(s, "Écran Noir").await;

    let by_ascii = s.search_content("cran NOIR").await.unwrap();
    assert_eq!(by_ascii.iter().map(|c| c.id).collect::<Vec<_>>(), vec![noir.id]);

    let cafe = movie(s, "Café Society").await;
    let by_upper = s.search_content("CAFÉ").await.unwrap();
    assert_eq!(by_upper.iter().map(|c| c.id).collect::<Vec<_>>(), vec![cafe.id]);
}

#[tokio::test]
async fn concurrent_view_increments_are_not_lost() {
    let storage = setup_storage().await;
    let id = movie(storage.as_ref(), "Viral").await.id;

    let mut tasks = JoinSet::new();
    for _ in 0..50 {
        let storage = Arc::clone(&storage);
        tasks.spawn(async move { storage.increment_view_count(id).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let fetched = storage.get_content_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched.view_count, 50);
}

#[tokio::test]
async fn episodes_are_ordered_by_season_then_number() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    let show = series(s, "Long Show").await;

    for (season, number) in [(2, 1), (1, 3), (1, 1), (2, 2), (1, 2)] {
        s.create_episode(episode(show.id, season, number)).await.unwrap();
    }

    let order: Vec<(i32, i32)> = s
        .get_episodes_by_content_id(show.id)
        .await
        .unwrap()
        .iter()
        .map(|e| (e.season_number, e.episode_number))
        .collect();

    assert_eq!(order, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2)]);
}

#[tokio::test]
async fn episodes_update_and_delete() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    let show = series(s, "Show").await;
    let pilot = s.create_episode(episode(show.id, 1, 1)).await.unwrap();

    let renamed = s
        .update_episode(
            pilot.id,
            EpisodeChanges {
                title: Some("Pilot".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("episode updated");
    assert_eq!(renamed.title, "Pilot");
    assert_eq!(renamed.video_url, pilot.video_url);

    let unchanged = s
        .update_episode(pilot.id, EpisodeChanges::default())
        .await
        .unwrap()
        .expect("episode exists");
    assert_eq!(unchanged.title, "Pilot");

    let ghost = EpisodeChanges {
        title: Some("Ghost".to_string()),
        ..Default::default()
    };
    assert!(s.update_episode(9999, ghost).await.unwrap().is_none());

    s.delete_episode(pilot.id).await.unwrap();
    assert!(s.get_episodes_by_content_id(show.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn favorites_add_check_and_remove() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    s.upsert_user(user("alice")).await.unwrap();
    let content = movie(s, "Favorite Movie").await;

    assert!(!s.is_favorite("alice", content.id).await.unwrap());

    let favorite = s.add_to_favorites("alice", content.id).await.unwrap();
    assert_eq!(favorite.user_id, "alice");
    assert!(s.is_favorite("alice", content.id).await.unwrap());

    s.remove_from_favorites("alice", content.id).await.unwrap();
    assert!(!s.is_favorite("alice", content.id).await.unwrap());

    // Removing again is a no-op.
    s.remove_from_favorites("alice", content.id).await.unwrap();
}

#[tokio::test]
async fn duplicate_favorites_are_allowed_and_removed_together() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    s.upsert_user(user("bob")).await.unwrap();
    let content = movie(s, "Twice").await;

    s.add_to_favorites("bob", content.id).await.unwrap();
    s.add_to_favorites("bob", content.id).await.unwrap();
    assert_eq!(s.get_user_favorites("bob").await.unwrap().len(), 2);

    s.remove_from_favorites("bob", content.id).await.unwrap();
    assert!(s.get_user_favorites("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn user_favorites_only_include_active_content() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    s.upsert_user(user("carol")).await.unwrap();
    s.upsert_user(user("dave")).await.unwrap();

    let kept = movie(s, "Kept").await;
    let retired = movie(s, "Retired").await;
    let other = movie(s, "Someone Else's").await;

    s.add_to_favorites("carol", kept.id).await.unwrap();
    s.add_to_favorites("carol", retired.id).await.unwrap();
    s.add_to_favorites("dave", other.id).await.unwrap();

    s.update_content(
        retired.id,
        ContentChanges {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let favorites = s.get_user_favorites("carol").await.unwrap();
    assert_eq!(favorites.iter().map(|c| c.id).collect::<Vec<_>>(), vec![kept.id]);
}

#[tokio::test]
async fn deleting_content_cascades_to_episodes_and_favorites() {
    let storage = setup_storage().await;
    let s = storage.as_ref();
    s.upsert_user(user("erin")).await.unwrap();
    let show = series(s, "Cancelled").await;

    s.create_episode(episode(show.id, 1, 1)).await.unwrap();
    s.create_episode(episode(show.id, 1, 2)).await.unwrap();
    s.add_to_favorites("erin", show.id).await.unwrap();

    s.delete_content(show.id).await.unwrap();

    assert!(s.get_episodes_by_content_id(show.id).await.unwrap().is_empty());
    assert!(!s.is_favorite("erin", show.id).await.unwrap());
}

#[tokio::test]
async fn upsert_user_inserts_then_overwrites() {
    let storage = setup_storage().await;
    let s = storage.as_ref();

    let created = s.upsert_user(user("frank")).await.unwrap();
    assert_eq!(created.email.as_deref(), Some("frank@example.com"));

    let mut changed = user("frank");
    changed.email = Some("frank@new.example.com".to_string());
    changed.first_name = None;
    let updated = s.upsert_user(changed).await.unwrap();

    assert_eq!(updated.id, "frank");
    assert_eq!(updated.email.as_deref(), Some("frank@new.example.com"));
    assert_eq!(updated.first_name, None);
    assert!(updated.updated_at >= created.updated_at);

    let fetched = s.get_user("frank").await.unwrap().expect("user exists");
    assert_eq!(fetched, updated);
    assert!(s.get_user("nobody").await.unwrap().is_none());
}
