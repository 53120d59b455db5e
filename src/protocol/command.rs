#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    ValidateListing,
    CropFields,
    ListingList,
    ListingSave,
    ListingOpen,
    ArtworkRegister,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "validate_listing" => Command::ValidateListing,
            "crop_fields" => Command::CropFields,
            "listing.list" => Command::ListingList,
            "listing.save" => Command::ListingSave,
            "listing.open" => Command::ListingOpen,
            "artwork.register" => Command::ArtworkRegister,
            _ => Command::Unknown,
        }
    }
}
