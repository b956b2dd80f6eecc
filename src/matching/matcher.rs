//! Greedy section-to-image assignment with an escalating repetition penalty
//!
//! Sections are visited in the order they are supplied. For each one every
//! palette image is scored as
//!
//! ```text
//! score = euclidean_rgb(section, image) * (1 + uses(image) * penalty)
//! ```
//!
//! and the strictly lowest score wins, so among equal scores the image that
//! appears first in the palette is kept. Usage counts carry over from one
//! section to the next, which makes the result depend on section order.

use crate::color::{Color, euclidean_rgb};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::matching::usage::UsageCounter;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Section assignments in processing order together with final usage counts
#[derive(Debug, Clone)]
pub struct MatchResult<S, I: Eq + Hash> {
    assignments: Vec<(S, I)>,
    usage: UsageCounter<I>,
}

impl<S, I> MatchResult<S, I>
where
    S: Eq + Hash,
    I: Eq + Hash,
{
    /// Assignments in the order sections were processed
    pub fn assignments(&self) -> &[(S, I)] {
        &self.assignments
    }

    /// Usage counts accumulated over the whole run
    pub const fn usage(&self) -> &UsageCounter<I> {
        &self.usage
    }

    /// Image assigned to a section, if the section was part of the run
    ///
    /// Scans the assignments linearly; use [`Self::into_map`] for repeated
    /// lookups.
    pub fn image_for(&self, section: &S) -> Option<&I> {
        self.assignments
            .iter()
            .find(|(id, _)| id == section)
            .map(|(_, image)| image)
    }

    /// Number of assigned sections
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when no sections were supplied
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Convert into a section-to-image map, dropping processing order
    pub fn into_map(self) -> HashMap<S, I> {
        self.assignments.into_iter().collect()
    }
}

/// Matcher configured with a validated repetition penalty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMatcher {
    penalty: f64,
}

impl SectionMatcher {
    /// Create a matcher
    ///
    /// A penalty of zero gives plain nearest-color matching. Negative values
    /// would reward reuse and are rejected rather than clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if `penalty` is negative, NaN or infinite
    pub fn new(penalty: f64) -> Result<Self> {
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(invalid_parameter(
                "penalty",
                &penalty,
                &"must be a finite value >= 0",
            ));
        }
        Ok(Self { penalty })
    }

    /// Configured repetition penalty
    pub const fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Assign every section the best-scoring palette image
    ///
    /// `sections` fixes the processing order and `palette` fixes the
    /// tie-break order. An empty section list yields an empty result without
    /// looking at the palette; otherwise both are checked before any
    /// assignment is made.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette is empty while there are sections to match
    /// - A section id or an image id appears more than once
    pub fn match_sections<S, I>(
        &self,
        sections: &[(S, Color)],
        palette: &[(I, Color)],
    ) -> Result<MatchResult<S, I>>
    where
        S: Clone + Eq + Hash + Debug,
        I: Clone + Eq + Hash + Debug,
    {
        if sections.is_empty() {
            return Ok(MatchResult {
                assignments: Vec::new(),
                usage: UsageCounter::new(),
            });
        }
        if palette.is_empty() {
            return Err(MosaicError::EmptyPalette {
                sections: sections.len(),
            });
        }
        ensure_unique(sections, "section")?;
        ensure_unique(palette, "image")?;

        let mut usage = UsageCounter::new();
        let mut assignments = Vec::with_capacity(sections.len());

        for (section_id, section_color) in sections {
            let mut best: Option<(&I, f64)> = None;

            for (image_id, image_color) in palette {
                let distance = euclidean_rgb(*section_color, *image_color);
                // Unfused on purpose: mul_add rounds differently and can split ties
                #[allow(clippy::suboptimal_flops)]
                let score = distance * (1.0 + usage.count(image_id) as f64 * self.penalty);

                if best.is_none_or(|(_, best_score)| score < best_score) {
                    best = Some((image_id, score));
                }
            }

            let (chosen, _) = best.ok_or(MosaicError::EmptyPalette {
                sections: sections.len(),
            })?;
            usage.record(chosen.clone());
            assignments.push((section_id.clone(), chosen.clone()));
        }

        tracing::debug!(
            sections = assignments.len(),
            palette = palette.len(),
            distinct = usage.distinct(),
            penalty = self.penalty,
            "Matched sections"
        );

        Ok(MatchResult { assignments, usage })
    }
}

fn ensure_unique<K>(entries: &[(K, Color)], kind: &'static str) -> Result<()>
where
    K: Eq + Hash + Debug,
{
    let mut seen = HashSet::with_capacity(entries.len());
    for (id, _) in entries {
        if !seen.insert(id) {
            return Err(MosaicError::DuplicateIdentifier {
                kind,
                id: format!("{id:?}"),
            });
        }
    }
    Ok(())
}
