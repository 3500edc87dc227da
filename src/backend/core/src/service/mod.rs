//! Application services between the HTTP layer and the store.

mod read;
mod write;

pub use read::JobOfferReadService;
pub use write::JobOfferWriteService;
