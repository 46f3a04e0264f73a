//! Embassy tasks

mod game;

pub use game::game_task;
