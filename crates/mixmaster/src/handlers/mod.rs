pub mod covers;
pub mod error;
pub mod events;
pub mod health;
pub mod multipart;
pub mod tracks;

pub use error::ApiError;
