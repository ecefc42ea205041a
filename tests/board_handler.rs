//! Board handler integration tests.
//!
//! Tests board creation and the my/invited/public/closed listings against a
//! fixture with one board of each kind.

mod common;

use std::sync::Arc;

use common::{add_member, ids, sorted, BoardFixture, OTHER_CREATOR};
use corkboard::config::BoardConfig;
use corkboard::{
    is_valid_id, BoardHandler, BoardListing, BoardRepository, CorkboardError, Database, EntityId,
    NewBoard, NewUser, UserRepository,
};

/// Creating a board for something that is not a user yields no board.
#[tokio::test]
async fn test_create_board_with_nonexistent_user() {
    let db = Database::open_in_memory().await.unwrap();
    let config = BoardConfig::default();
    let handler = BoardHandler::new(&db, &config);

    let result = handler.create_board("test", &NewBoard::default()).await;
    assert!(matches!(result, Ok(None)));

    let result = handler
        .create_board(OTHER_CREATOR, &NewBoard::default())
        .await;
    assert!(matches!(result, Ok(None)));
}

/// Creating a board for a stored user yields a valid id owned by that user.
#[tokio::test]
async fn test_create_board_with_existent_user() {
    let db = Database::open_in_memory().await.unwrap();
    let config = BoardConfig::default();
    let member = UserRepository::new(db.pool())
        .create(&NewUser::new("dxiao").with_email("dxiao@example.com"))
        .await
        .unwrap();
    let handler = BoardHandler::new(&db, &config);

    let id = handler
        .create_board(member.id.as_str(), &NewBoard::default())
        .await
        .unwrap()
        .unwrap();

    assert!(is_valid_id(id.as_str()));
    let board = BoardRepository::new(db.pool())
        .get_by_id(&id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(board.creator_id, member.id);
    assert_eq!(board.title, config.default_title);
}

#[tokio::test]
async fn test_list_my_boards() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    let boards = handler.list_my_boards(&f.member.id).await.unwrap();
    assert_eq!(boards.len(), 2);
    assert_eq!(ids(&boards), sorted(&[&f.my_board, &f.invited_board]));
}

#[tokio::test]
async fn test_list_invited_boards() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    let boards = handler.list_invited_boards(&f.member.id).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, f.invited_board);
}

#[tokio::test]
async fn test_list_public_boards() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    let boards = handler.list_public_boards(&f.member.id).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, f.public_board);

    // Visible to a user with no relations at all.
    let stranger = UserRepository::new(f.db.pool())
        .create(&NewUser::new("stranger"))
        .await
        .unwrap();
    let boards = handler.list_public_boards(&stranger.id).await.unwrap();
    assert_eq!(ids(&boards), vec![f.public_board.clone()]);
}

#[tokio::test]
async fn test_list_closed_boards() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    // A closed board the member has no relation to.
    let other: EntityId = OTHER_CREATOR.parse().unwrap();
    BoardRepository::new(f.db.pool())
        .create(&other, &NewBoard::new("someone else's").with_closed(true))
        .await
        .unwrap();

    let boards = handler.list_closed_boards(&f.member.id).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, f.closed_board);
}

/// Listing twice without writes in between returns the same boards.
#[tokio::test]
async fn test_listings_are_repeatable() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    for listing in BoardListing::ALL {
        let first = handler.list_boards(&f.member.id, listing).await.unwrap();
        let second = handler.list_boards(&f.member.id, listing).await.unwrap();
        assert_eq!(ids(&first), ids(&second), "{listing} changed");
    }
}

/// A creator who is also a member of their own board sees it once.
#[tokio::test]
async fn test_creator_membership_does_not_duplicate() {
    let f = BoardFixture::new().await;
    add_member(&f.db, &f.my_board, &f.member.id).await;
    let handler = BoardHandler::new(&f.db, &f.config);

    let boards = handler.list_my_boards(&f.member.id).await.unwrap();
    assert_eq!(boards.len(), 2);
    let invited = handler.list_invited_boards(&f.member.id).await.unwrap();
    assert_eq!(ids(&invited), vec![f.invited_board.clone()]);
}

/// Deleting the member removes their relations and with them the
/// invited and closed boards from any later listing.
#[tokio::test]
async fn test_deleted_member_loses_relations() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);

    assert!(UserRepository::new(f.db.pool())
        .delete(&f.member.id)
        .await
        .unwrap());

    let invited = handler.list_invited_boards(&f.member.id).await.unwrap();
    assert!(invited.is_empty());
    let closed = handler.list_closed_boards(&f.member.id).await.unwrap();
    assert!(closed.is_empty());
    // Boards themselves survive; the creator id is not a foreign key.
    let mine = handler.list_my_boards(&f.member.id).await.unwrap();
    assert_eq!(ids(&mine), vec![f.my_board.clone()]);
}

/// Listings issued concurrently against one database agree with each other.
#[tokio::test]
async fn test_concurrent_listings() {
    let f = Arc::new(BoardFixture::new().await);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let f = Arc::clone(&f);
        handles.push(tokio::spawn(async move {
            let handler = BoardHandler::new(&f.db, &f.config);
            handler.list_my_boards(&f.member.id).await.unwrap().len()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 2);
    }
}

/// Storage failures come back as database errors, not empty results.
#[tokio::test]
async fn test_storage_failure_is_returned() {
    let f = BoardFixture::new().await;
    let handler = BoardHandler::new(&f.db, &f.config);
    f.db.close().await;

    for listing in BoardListing::ALL {
        let result = handler.list_boards(&f.member.id, listing).await;
        assert!(
            matches!(result, Err(CorkboardError::Database(_))),
            "{listing}: {result:?}"
        );
    }

    let result = handler
        .create_board(f.member.id.as_str(), &NewBoard::new("after close"))
        .await;
    assert!(matches!(result, Err(CorkboardError::Database(_))), "{result:?}");
}

/// A file-backed database keeps boards across reopen.
#[tokio::test]
async fn test_file_database_persists_boards() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corkboard.db");
    let config = BoardConfig::default();

    let member_id = {
        let db = Database::open(&path).await.unwrap();
        let member = UserRepository::new(db.pool())
            .create(&NewUser::new("dxiao"))
            .await
            .unwrap();
        BoardHandler::new(&db, &config)
            .create_board(member.id.as_str(), &NewBoard::new("kept"))
            .await
            .unwrap()
            .unwrap();
        db.close().await;
        member.id
    };

    let db = Database::open(&path).await.unwrap();
    let boards = BoardHandler::new(&db, &config)
        .list_my_boards(&member_id)
        .await
        .unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].title, "kept");
    db.close().await;
}
