pub mod intent;
pub mod record;

pub use intent::{HouseQuery, Intent, ItemQuery, Price, PropertyType};
pub use record::{
    ListingRecord, MarketplaceRecord, NormalizedRecord, ResponseEnvelope, SocialRecord, Source,
    UNKNOWN_DATE,
};
