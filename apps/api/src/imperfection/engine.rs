//! The imperfection transform: plain text in, effect-annotated characters out.
//!
//! # Draw order
//! The sequence of random draws is part of the contract, since a page is replayed
//! from its draw stream:
//! - one draw per word for the stuck key (always consumed, even when the word is
//!   not eligible)
//! - per character: typo, then a substitute pick only if the typo roll succeeded and
//!   the letter has a table entry, then faded, heavy, uneven (+ direction on
//!   success), spacing (+ direction on success)
//!
//! Whitespace runs consume no draws and pass through untouched.

use tracing::debug;

use crate::imperfection::effects::{AnnotatedChar, Baseline, EffectSet, Spacing};
use crate::imperfection::profile::{ImperfectionError, SeverityLevel, SeverityProfile};
use crate::imperfection::random::RandomSource;
use crate::imperfection::typos::{is_stuck_key_word, substitutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Gap(&'a str),
}

/// Splits text into alternating runs of non-whitespace and whitespace, keeping
/// every whitespace run byte-for-byte.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_gap: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_gap = ch.is_whitespace();
        match in_gap {
            Some(current) if current != is_gap => {
                tokens.push(make_token(&text[start..idx], current));
                start = idx;
                in_gap = Some(is_gap);
            }
            None => in_gap = Some(is_gap),
            _ => {}
        }
    }
    if let Some(current) = in_gap {
        tokens.push(make_token(&text[start..], current));
    }
    tokens
}

fn make_token(run: &str, is_gap: bool) -> Token<'_> {
    if is_gap {
        Token::Gap(run)
    } else {
        Token::Word(run)
    }
}

/// Applies imperfections for a level given by its identifier.
///
/// Fails only when `level` is not one of `minimal`, `light`, `medium`, `heavy`.
pub fn apply_imperfections<R: RandomSource + ?Sized>(
    text: &str,
    level: &str,
    rng: &mut R,
) -> Result<Vec<AnnotatedChar>, ImperfectionError> {
    let level: SeverityLevel = level.parse()?;
    Ok(apply_level(text, level, rng))
}

/// Applies imperfections for an already-resolved level. Never fails.
pub fn apply_level<R: RandomSource + ?Sized>(
    text: &str,
    level: SeverityLevel,
    rng: &mut R,
) -> Vec<AnnotatedChar> {
    let profile = level.profile();
    let mut out = Vec::with_capacity(text.len());
    let mut stuck_words = 0usize;

    for token in tokenize(text) {
        match token {
            Token::Gap(gap) => out.extend(gap.chars().map(AnnotatedChar::plain)),
            Token::Word(word) => {
                if roll(rng, profile.stuck_key_chance) && is_stuck_key_word(word) {
                    stuck_words += 1;
                    out.extend(word.chars().chain(word.chars()).map(AnnotatedChar::plain));
                } else {
                    out.extend(word.chars().map(|ch| strike(ch, profile, rng)));
                }
            }
        }
    }

    debug!(
        level = %level,
        input_chars = text.chars().count(),
        output_chars = out.len(),
        stuck_words,
        "applied typewriter imperfections"
    );
    out
}

fn roll<R: RandomSource + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.next_f64() < chance
}

/// Types one non-whitespace character.
fn strike<R: RandomSource + ?Sized>(
    original: char,
    profile: &SeverityProfile,
    rng: &mut R,
) -> AnnotatedChar {
    let mut glyph = original;
    if roll(rng, profile.typo_chance) {
        if let Some(keys) = substitutes(original.to_ascii_lowercase()) {
            glyph = pick(keys, rng);
            if original.is_uppercase() && glyph.is_alphabetic() {
                glyph = glyph.to_ascii_uppercase();
            }
        }
    }

    let mut effects = EffectSet::NONE;
    effects.faded = roll(rng, profile.faded_chance);
    effects.heavy = roll(rng, profile.heavy_chance);
    if roll(rng, profile.uneven_chance) {
        effects.baseline = Some(if rng.next_f64() < 0.5 {
            Baseline::Up
        } else {
            Baseline::Down
        });
    }
    if roll(rng, profile.spacing_chance) {
        effects.spacing = Some(if rng.next_f64() < 0.5 {
            Spacing::Spaced
        } else {
            Spacing::Tight
        });
    }

    AnnotatedChar::with_effects(glyph, effects)
}

fn pick<R: RandomSource + ?Sized>(keys: &[char], rng: &mut R) -> char {
    let idx = (rng.next_f64() * keys.len() as f64) as usize;
    keys[idx.min(keys.len() - 1)]
}
