mod currency;
mod material;
mod metrics;
mod quote;
mod workshop;

pub use currency::Currency;
pub use material::{Material, MaterialUnit};
pub use metrics::GeometryMetrics;
pub use quote::{NewQuote, Quote};
pub use workshop::{NewWorkshop, SubscriptionStatus, Workshop};
