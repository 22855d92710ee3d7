//! Font-size based header detection.

use std::collections::BTreeMap;

use super::{MarkdownOptions, TextLine};

/// Maps font sizes to Markdown header levels.
///
/// The most common size (counted by visible characters) is taken as body
/// text. Sizes clearly above it become headers, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMap {
    /// Header sizes, largest first. Index 0 is `#`.
    levels: Vec<u32>,
}

impl HeaderMap {
    /// Build the map from every line that will be rendered.
    pub fn from_lines<'a, I>(lines: I, options: &MarkdownOptions) -> Self
    where
        I: IntoIterator<Item = &'a TextLine>,
    {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for line in lines {
            let visible = line.text.chars().filter(|c| !c.is_whitespace()).count();
            if visible > 0 {
                *counts.entry(line.size).or_default() += visible;
            }
        }

        // Ties go to the smaller size, BTreeMap iterates ascending.
        let body_size = counts
            .iter()
            .fold(None, |best: Option<(u32, usize)>, (&size, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((size, count)),
            })
            .map(|(size, _)| size)
            .unwrap_or(0);

        let threshold = body_size as f32 + options.header_size_delta;
        let levels = counts
            .keys()
            .rev()
            .copied()
            .filter(|&size| size as f32 >= threshold)
            .take(options.max_header_levels)
            .collect();

        Self { levels }
    }

    /// Header level (1-based) for a font size, if it is a header size.
    pub fn level(&self, size: u32) -> Option<usize> {
        self.levels.iter().position(|&s| s == size).map(|i| i + 1)
    }
}
