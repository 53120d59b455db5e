pub mod artwork;
pub mod crop;
pub mod listing;
pub mod slug;
pub mod tags;
pub mod validate;
