mod leg;
mod package;
mod quote;
mod request;
mod time_context;
mod zone;

pub use leg::GeoLeg;
pub use package::{PackageKey, PackageTier};
pub use quote::{DispositionPricing, Quote, QuoteDetails, TrafficDetails, TripPricing};
pub use request::{DispositionRequest, PricingRequest, TripRequest};
pub use time_context::{RateClass, TimeContext};
pub use zone::{FeeBreakdown, ZoneAssessment};
