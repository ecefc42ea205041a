//! Board module for Corkboard.
//!
//! This module provides the collaboration model:
//! - Boards with private, public and closed visibility
//! - Membership relations with invitation status
//! - Lists on boards and cards in lists
//! - The board handler answering "my", invited, public and closed listings

mod card;
mod card_repository;
mod handler;
mod list;
mod list_repository;
mod member;
mod member_repository;
mod repository;
mod types;

pub use card::{Card, CardUpdate, NewCard};
pub use card_repository::CardRepository;
pub use handler::BoardHandler;
pub use list::{BoardList, NewList};
pub use list_repository::ListRepository;
pub use member::{BoardMember, MemberStatus, NewBoardMember};
pub use member_repository::BoardMemberRepository;
pub use repository::BoardRepository;
pub use types::{Board, BoardListing, BoardUpdate, NewBoard, Visibility};
