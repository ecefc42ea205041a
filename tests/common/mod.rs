//! Shared fixtures for integration tests.

#![allow(dead_code)]

use corkboard::config::BoardConfig;
use corkboard::{
    BoardMemberRepository, BoardRepository, Database, EntityId, MemberStatus, NewBoard,
    NewBoardMember, NewUser, User, UserRepository,
};

/// Creator of every board the member did not create. Not a stored user.
pub const OTHER_CREATOR: &str = "4eea50bc91e31d174600016d";

/// A member with one board of each kind.
///
/// - `my_board`: private, created by the member
/// - `invited_board`: private, created by someone else, member relation
/// - `public_board`: public, created by someone else, no relation
/// - `closed_board`: closed (and flagged public), member relation
pub struct BoardFixture {
    pub db: Database,
    pub config: BoardConfig,
    pub member: User,
    pub my_board: EntityId,
    pub invited_board: EntityId,
    pub public_board: EntityId,
    pub closed_board: EntityId,
}

impl BoardFixture {
    /// Build the fixture step by step so every reference exists first.
    pub async fn new() -> Self {
        let db = Database::open_in_memory().await.unwrap();
        let other: EntityId = OTHER_CREATOR.parse().unwrap();

        let member = UserRepository::new(db.pool())
            .create(&NewUser::new("dxiao").with_email("dxiao@example.com"))
            .await
            .unwrap();

        let boards = BoardRepository::new(db.pool());
        let my_board = boards
            .create(&member.id, &NewBoard::new("test myBoard"))
            .await
            .unwrap()
            .id;
        let invited_board = boards
            .create(&other, &NewBoard::new("test invitedBoard"))
            .await
            .unwrap()
            .id;
        add_member(&db, &invited_board, &member.id).await;

        let public_board = boards
            .create(&other, &NewBoard::new("test publicBoard").with_public(true))
            .await
            .unwrap()
            .id;
        let closed_board = boards
            .create(
                &other,
                &NewBoard::new("test closedBoard")
                    .with_public(true)
                    .with_closed(true),
            )
            .await
            .unwrap()
            .id;
        add_member(&db, &closed_board, &member.id).await;

        Self {
            db,
            config: BoardConfig::default(),
            member,
            my_board,
            invited_board,
            public_board,
            closed_board,
        }
    }
}

/// Give `user_id` an active relation to `board_id`.
pub async fn add_member(db: &Database, board_id: &EntityId, user_id: &EntityId) {
    BoardMemberRepository::new(db.pool())
        .create(
            &NewBoardMember::new(board_id.clone(), user_id.clone())
                .with_status(MemberStatus::Available),
        )
        .await
        .unwrap();
}

/// Sorted ids of a board collection.
pub fn ids(boards: &[corkboard::Board]) -> Vec<EntityId> {
    let mut ids: Vec<EntityId> = boards.iter().map(|b| b.id.clone()).collect();
    ids.sort();
    ids
}

/// Sorted copy of the given ids.
pub fn sorted(ids: &[&EntityId]) -> Vec<EntityId> {
    let mut ids: Vec<EntityId> = ids.iter().map(|id| (*id).clone()).collect();
    ids.sort();
    ids
}
