use indexmap::IndexMap;

use crate::color::ColorHex;

/// Occurrence tally of exact colors, kept in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCount {
    counts: IndexMap<ColorHex, usize>,
}

impl ColorCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, color: ColorHex) {
        *self.counts.entry(color).or_insert(0) += 1;
    }

    pub fn get(&self, color: &ColorHex) -> Option<usize> {
        self.counts.get(color).copied()
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of pixels tallied.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColorHex, usize)> + '_ {
        self.counts.iter().map(|(color, count)| (color, *count))
    }

    /// The color with the highest count. A later color only displaces the
    /// current best with a strictly greater count, so ties go to whichever
    /// color was seen first.
    pub fn most_frequent(&self) -> Option<(&ColorHex, usize)> {
        let mut entries = self.iter();
        let mut best = entries.next()?;
        for candidate in entries {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        Some(best)
    }
}

impl FromIterator<ColorHex> for ColorCount {
    fn from_iter<I: IntoIterator<Item = ColorHex>>(iter: I) -> Self {
        let mut counts = ColorCount::new();
        for color in iter {
            counts.increment(color);
        }
        counts
    }
}
