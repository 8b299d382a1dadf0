// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the pair
// analyzer. Every public function returns `Option<T>` so callers are forced
// to handle insufficient-data and numerical-edge-case scenarios with an
// explicit default — there is no error path out of this module.

pub mod ema;
pub mod levels;
pub mod rsi;

pub use ema::ema;
pub use levels::support_resistance;
pub use rsi::rsi;
