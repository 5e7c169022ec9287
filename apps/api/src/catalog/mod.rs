// Mock marketplace: garment enrichment and product search.
// No outbound calls; every listing is synthesized from static tables.

pub mod enrichment;
pub mod handlers;

pub use enrichment::{ProductCatalog, ProductListing};
