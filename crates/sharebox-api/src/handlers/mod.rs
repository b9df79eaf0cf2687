pub mod describe;
pub mod download;
pub mod health;
pub mod notify;
pub mod upload;
