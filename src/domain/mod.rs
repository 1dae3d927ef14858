pub mod lang;
pub mod listing;
pub mod site_copy;

pub use lang::Lang;
pub use listing::ListingRecord;
