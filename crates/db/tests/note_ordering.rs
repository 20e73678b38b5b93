//! Repository-level tests for note positions, reorder atomicity, and tag
//! associations.

use sqlx::PgPool;

use jotter_db::models::category::CreateCategory;
use jotter_db::models::note::{CreateNote, UpdateNote};
use jotter_db::models::user::CreateUser;
use jotter_db::repositories::{CategoryRepo, NoteRepo, SessionRepo, TagRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        },
    )
    .await
    .unwrap();
    user.id
}

fn new_note(title: &str) -> CreateNote {
    CreateNote {
        title: title.to_string(),
        content: String::new(),
        category_id: None,
        color: None,
        tags: None,
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_appends_at_position_count(pool: PgPool) {
    let user = new_user(&pool, "alice").await;

    let first = NoteRepo::create(&pool, user, &new_note("First")).await.unwrap();
    let second = NoteRepo::create(&pool, user, &new_note("Second")).await.unwrap();

    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);

    // Another user's count starts from zero.
    let other = new_user(&pool, "bob").await;
    let theirs = NoteRepo::create(&pool, other, &new_note("Mine")).await.unwrap();
    assert_eq!(theirs.position, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reorder_assigns_position_by_index(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let a = NoteRepo::create(&pool, user, &new_note("A")).await.unwrap();
    let b = NoteRepo::create(&pool, user, &new_note("B")).await.unwrap();
    let c = NoteRepo::create(&pool, user, &new_note("C")).await.unwrap();

    let applied = NoteRepo::reorder(&pool, user, &[c.id, a.id, b.id]).await.unwrap();
    assert!(applied);

    let notes = NoteRepo::list(&pool, user).await.unwrap();
    let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
    let positions: Vec<i32> = notes.iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reorder_is_all_or_nothing(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let other = new_user(&pool, "mallory").await;

    let a = NoteRepo::create(&pool, user, &new_note("A")).await.unwrap();
    let b = NoteRepo::create(&pool, user, &new_note("B")).await.unwrap();
    let foreign = NoteRepo::create(&pool, other, &new_note("M")).await.unwrap();

    // One foreign id poisons the whole batch.
    let applied = NoteRepo::reorder(&pool, user, &[b.id, foreign.id, a.id])
        .await
        .unwrap();
    assert!(!applied);

    let notes = NoteRepo::list(&pool, user).await.unwrap();
    let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a.id, b.id], "original order must be intact");

    // A nonexistent id fails the same way.
    let applied = NoteRepo::reorder(&pool, user, &[a.id, 999_999]).await.unwrap();
    assert!(!applied);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_leaves_position_gap(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let a = NoteRepo::create(&pool, user, &new_note("A")).await.unwrap();
    let b = NoteRepo::create(&pool, user, &new_note("B")).await.unwrap();
    let c = NoteRepo::create(&pool, user, &new_note("C")).await.unwrap();

    assert!(NoteRepo::delete(&pool, user, b.id).await.unwrap());

    let notes = NoteRepo::list(&pool, user).await.unwrap();
    let positions: Vec<i32> = notes.iter().map(|n| n.position).collect();
    assert_eq!(positions, vec![0, 2], "survivors keep their positions");
    assert_eq!(notes[0].id, a.id);
    assert_eq!(notes[1].id, c.id);
}

// ---------------------------------------------------------------------------
// Tag associations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_tag_links(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let urgent = TagRepo::create_or_get(&pool, "urgent", None).await.unwrap();
    let later = TagRepo::create_or_get(&pool, "later", None).await.unwrap();

    let mut input = new_note("Tagged");
    input.tags = Some(vec![urgent.id]);
    let note = NoteRepo::create(&pool, user, &input).await.unwrap();
    assert_eq!(NoteRepo::tags_for_note(&pool, note.id).await.unwrap(), vec![urgent.id]);

    let patch = UpdateNote {
        tags: Some(vec![later.id]),
        ..Default::default()
    };
    NoteRepo::update(&pool, user, note.id, &patch).await.unwrap().unwrap();
    assert_eq!(NoteRepo::tags_for_note(&pool, note.id).await.unwrap(), vec![later.id]);

    // Deleting the note cascades the links but keeps the tag rows.
    NoteRepo::delete(&pool, user, note.id).await.unwrap();
    let tags = TagRepo::list(&pool).await.unwrap();
    assert_eq!(tags.len(), 2, "orphaned tags are kept");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_or_get_is_idempotent(pool: PgPool) {
    let first = TagRepo::create_or_get(&pool, "urgent", None).await.unwrap();
    let second = TagRepo::create_or_get(&pool, "urgent", Some("#ff0000")).await.unwrap();

    assert_eq!(first.id, second.id);
    // The later color choice wins.
    assert_eq!(second.color.as_deref(), Some("#ff0000"));

    assert_eq!(TagRepo::count_existing(&pool, &[first.id]).await.unwrap(), 1);
    assert_eq!(TagRepo::count_existing(&pool, &[first.id, 999_999]).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Category detach
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_category_delete_detaches_notes(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let category = CategoryRepo::create(
        &pool,
        user,
        &CreateCategory {
            name: "Work".to_string(),
            color: None,
            description: None,
        },
    )
    .await
    .unwrap();

    let mut input = new_note("Report");
    input.category_id = Some(category.id);
    let note = NoteRepo::create(&pool, user, &input).await.unwrap();
    assert_eq!(note.category_id, Some(category.id));

    assert!(CategoryRepo::delete(&pool, user, category.id).await.unwrap());

    let note = NoteRepo::find_by_id(&pool, user, note.id).await.unwrap().unwrap();
    assert_eq!(note.category_id, None, "note survives with category cleared");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_session_expiry_and_cleanup(pool: PgPool) {
    let user = new_user(&pool, "alice").await;
    let now = chrono::Utc::now();

    SessionRepo::create(&pool, user, "hash-live", now + chrono::Duration::days(7))
        .await
        .unwrap();
    SessionRepo::create(&pool, user, "hash-dead", now - chrono::Duration::hours(1))
        .await
        .unwrap();

    assert!(SessionRepo::find_valid_by_hash(&pool, "hash-live").await.unwrap().is_some());
    assert!(SessionRepo::find_valid_by_hash(&pool, "hash-dead").await.unwrap().is_none());

    let removed = SessionRepo::delete_expired(&pool).await.unwrap();
    assert_eq!(removed, 1);

    // The live session survives cleanup and can still be revoked.
    assert!(SessionRepo::delete_by_hash(&pool, "hash-live").await.unwrap());
    assert!(!SessionRepo::delete_by_hash(&pool, "hash-live").await.unwrap());
}
