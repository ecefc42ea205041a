//! Corkboard - board/list/card collaboration backend
//!
//! Boards have members with an invitation status; the board handler lists a
//! user's boards by relation and visibility.

pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod logging;

pub use board::{
    Board, BoardHandler, BoardList, BoardListing, BoardMember, BoardMemberRepository,
    BoardRepository, BoardUpdate, Card, CardRepository, ListRepository, MemberStatus, NewBoard,
    NewBoardMember, NewCard, NewList, Visibility,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository, UserUpdate};
pub use error::{CorkboardError, Result};
pub use id::{is_valid_id, EntityId};
