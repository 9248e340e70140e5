//! Effect vocabulary carried by every annotated character.
//!
//! The wire names (`faded`, `heavy`, `uneven-up`, `uneven-down`, `spaced`, `tight`)
//! are a stable contract for every consumer of the annotated stream: the HTML markup,
//! the live reveal, and the export layout all read the same tags.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Tags
// ────────────────────────────────────────────────────────────────────────────

/// A single visual marker on a typed glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectTag {
    Faded,
    Heavy,
    UnevenUp,
    UnevenDown,
    Spaced,
    Tight,
}

impl EffectTag {
    pub const ALL: [EffectTag; 6] = [
        EffectTag::Faded,
        EffectTag::Heavy,
        EffectTag::UnevenUp,
        EffectTag::UnevenDown,
        EffectTag::Spaced,
        EffectTag::Tight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EffectTag::Faded => "faded",
            EffectTag::Heavy => "heavy",
            EffectTag::UnevenUp => "uneven-up",
            EffectTag::UnevenDown => "uneven-down",
            EffectTag::Spaced => "spaced",
            EffectTag::Tight => "tight",
        }
    }

    /// CSS class used by the live HTML view.
    pub fn css_class(self) -> &'static str {
        match self {
            EffectTag::Faded => "char-faded",
            EffectTag::Heavy => "char-heavy",
            EffectTag::UnevenUp => "char-uneven",
            EffectTag::UnevenDown => "char-uneven-down",
            EffectTag::Spaced => "char-spaced",
            EffectTag::Tight => "char-tight",
        }
    }
}

impl fmt::Display for EffectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical displacement of a glyph off the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Baseline {
    Up,
    Down,
}

/// Horizontal advance irregularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spacing {
    Spaced,
    Tight,
}

/// Resolved colour treatment of a glyph. Heavy wins over faded on every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Normal,
    Faded,
    Heavy,
}

// ────────────────────────────────────────────────────────────────────────────
// Effect set
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("effect tags `{0}` and `{1}` cannot be combined on one character")]
pub struct EffectConflict(pub EffectTag, pub EffectTag);

/// The effects on one character.
///
/// Baseline and spacing are single-valued, so `uneven-up`/`uneven-down` and
/// `spaced`/`tight` can never coexist. On the wire the set is an ordered tag list
/// (faded, heavy, uneven, spacing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<EffectTag>", try_from = "Vec<EffectTag>")]
pub struct EffectSet {
    pub faded: bool,
    pub heavy: bool,
    pub baseline: Option<Baseline>,
    pub spacing: Option<Spacing>,
}

impl EffectSet {
    pub const NONE: EffectSet = EffectSet {
        faded: false,
        heavy: false,
        baseline: None,
        spacing: None,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Tags in emission order.
    pub fn tags(&self) -> Vec<EffectTag> {
        let mut tags = Vec::with_capacity(4);
        if self.faded {
            tags.push(EffectTag::Faded);
        }
        if self.heavy {
            tags.push(EffectTag::Heavy);
        }
        match self.baseline {
            Some(Baseline::Up) => tags.push(EffectTag::UnevenUp),
            Some(Baseline::Down) => tags.push(EffectTag::UnevenDown),
            None => {}
        }
        match self.spacing {
            Some(Spacing::Spaced) => tags.push(EffectTag::Spaced),
            Some(Spacing::Tight) => tags.push(EffectTag::Tight),
            None => {}
        }
        tags
    }

    pub fn contains(&self, tag: EffectTag) -> bool {
        match tag {
            EffectTag::Faded => self.faded,
            EffectTag::Heavy => self.heavy,
            EffectTag::UnevenUp => self.baseline == Some(Baseline::Up),
            EffectTag::UnevenDown => self.baseline == Some(Baseline::Down),
            EffectTag::Spaced => self.spacing == Some(Spacing::Spaced),
            EffectTag::Tight => self.spacing == Some(Spacing::Tight),
        }
    }

    pub fn ink(&self) -> Ink {
        if self.heavy {
            Ink::Heavy
        } else if self.faded {
            Ink::Faded
        } else {
            Ink::Normal
        }
    }

    /// Adds a tag, rejecting the opposite member of an exclusive pair.
    pub fn insert(&mut self, tag: EffectTag) -> Result<(), EffectConflict> {
        match tag {
            EffectTag::Faded => self.faded = true,
            EffectTag::Heavy => self.heavy = true,
            EffectTag::UnevenUp | EffectTag::UnevenDown => {
                let wanted = if tag == EffectTag::UnevenUp {
                    Baseline::Up
                } else {
                    Baseline::Down
                };
                match self.baseline {
                    Some(existing) if existing != wanted => {
                        return Err(EffectConflict(EffectTag::UnevenUp, EffectTag::UnevenDown))
                    }
                    _ => self.baseline = Some(wanted),
                }
            }
            EffectTag::Spaced | EffectTag::Tight => {
                let wanted = if tag == EffectTag::Spaced {
                    Spacing::Spaced
                } else {
                    Spacing::Tight
                };
                match self.spacing {
                    Some(existing) if existing != wanted => {
                        return Err(EffectConflict(EffectTag::Spaced, EffectTag::Tight))
                    }
                    _ => self.spacing = Some(wanted),
                }
            }
        }
        Ok(())
    }
}

impl From<EffectSet> for Vec<EffectTag> {
    fn from(set: EffectSet) -> Self {
        set.tags()
    }
}

impl TryFrom<Vec<EffectTag>> for EffectSet {
    type Error = EffectConflict;

    fn try_from(tags: Vec<EffectTag>) -> Result<Self, Self::Error> {
        let mut set = EffectSet::NONE;
        for tag in tags {
            set.insert(tag)?;
        }
        Ok(set)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Annotated character
// ────────────────────────────────────────────────────────────────────────────

/// The engine's output unit: a glyph plus its effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnotatedChar {
    pub glyph: char,
    #[serde(default)]
    pub effects: EffectSet,
}

impl AnnotatedChar {
    pub fn plain(glyph: char) -> Self {
        Self {
            glyph,
            effects: EffectSet::NONE,
        }
    }

    pub fn with_effects(glyph: char, effects: EffectSet) -> Self {
        Self { glyph, effects }
    }
}
