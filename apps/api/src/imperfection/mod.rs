// Imperfection engine: turns plain text into an effect-annotated character stream.
// Pure and synchronous; every random decision comes from an injected RandomSource.

pub mod effects;
pub mod engine;
pub mod handlers;
pub mod markup;
pub mod profile;
pub mod random;
pub mod typos;

// Re-export the public API consumed by the layout, render, and HTTP modules.
pub use effects::{AnnotatedChar, Baseline, EffectSet, Ink, Spacing};
pub use engine::apply_imperfections;
pub use profile::ImperfectionError;
pub use random::{RandomSource, SeededRandom};
