// Live reveal adapter: timing plan and the cancellable reveal loop.

pub mod handlers;
pub mod plan;
pub mod presenter;

pub use plan::{RevealMode, RevealPlan};
