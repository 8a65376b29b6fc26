//! Safety policy: harm-category thresholds loaded once at startup.

mod category;
mod policy;


pub use category::{HarmBlockThreshold, HarmCategory};
pub use policy::{SafetyPolicy, SafetySetting};
