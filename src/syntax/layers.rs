//! Layer aggregation: byte-range emissions become rune spans grouped by resolved style.

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, Serializer};

use super::offsets::OffsetTable;
use super::Emission;
use crate::theme::{Color, Style, Theme};

/// Half-open rune interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn contains(&self, rune_offset: usize) -> bool {
        self.start <= rune_offset && rune_offset < self.end
    }
}

/// Every span painted with one style, in the order the tree was visited.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Layer {
    style: Style,
    spans: Vec<Span>,
}

impl Layer {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            spans: Vec::new(),
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn fg(&self) -> Color {
        self.style.fg
    }

    pub fn bg(&self) -> Option<Color> {
        self.style.bg
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Appends `span`. Only the last span is checked: a span starting inside it is folded
    /// into it, a touching span stays separate. Non-consecutive overlaps are kept as is.
    pub fn add(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        if let Some(prev) = self.spans.last_mut() {
            if span.start >= prev.start && span.start < prev.end {
                prev.end = prev.end.max(span.end);
                return;
            }
        }
        self.spans.push(span);
    }
}

/// Style -> layer map. Iteration follows the order styles were first needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    index: FxHashMap<Style, usize>,
    layers: Vec<Layer>,
}

impl Layers {
    pub fn get(&self, style: &Style) -> Option<&Layer> {
        self.index.get(style).map(|&idx| &self.layers[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total number of spans across all layers.
    pub fn span_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    fn layer_mut(&mut self, style: Style) -> &mut Layer {
        let idx = match self.index.get(&style) {
            Some(&idx) => idx,
            None => {
                let idx = self.layers.len();
                self.layers.push(Layer::new(style));
                self.index.insert(style, idx);
                idx
            }
        };
        &mut self.layers[idx]
    }
}

impl<'a> IntoIterator for &'a Layers {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

impl Serialize for Layers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.layers.serialize(serializer)
    }
}

/// Translates `emissions` to rune spans and buckets them by the style `theme` assigns.
///
/// Emissions starting past the end of `offsets` (stale positions) and emissions whose
/// category has no style are dropped. Output depends only on the inputs, so re-running on
/// the same text reproduces the same layers span for span.
pub fn aggregate(emissions: &[Emission], offsets: &OffsetTable, theme: &Theme) -> Layers {
    let mut layers = Layers::default();

    for emission in emissions {
        if emission.len == 0 {
            continue;
        }
        let Some(start) = offsets.rune_offset(emission.start) else {
            tracing::trace!(?emission, "dropping emission past end of text");
            continue;
        };
        // A range running past the text is cut at its end.
        let end = offsets
            .rune_end(emission.start + emission.len)
            .unwrap_or(offsets.rune_len());

        let Some(style) = theme.style(emission.category) else {
            continue;
        };

        layers.layer_mut(style).add(Span::new(start, end));
    }

    layers
}

#[cfg(test)]
#[path = "../../tests/unit/syntax/layers.rs"]
mod tests;
