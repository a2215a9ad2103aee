pub mod catalog;
pub mod offers;

pub use catalog::CatalogResponse;
pub use offers::{GameOffer, UpcomingOffer};
