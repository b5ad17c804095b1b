pub mod posts;
pub mod verify;
