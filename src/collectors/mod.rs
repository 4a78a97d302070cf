pub mod bandwidth;
pub mod platform;

pub use bandwidth::RateSampler;
pub use platform::{AttributeSource, CounterSource, ProcNetDev, SysfsAttributes};
