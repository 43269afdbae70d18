//! Byte-offset source spans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// A zero-width span at `pos`.
    pub fn point(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// True when `pos` lies on or inside the span, including its end.
    pub fn touches(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// The smallest span covering both inputs.
    pub fn union(&self, other: Span) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A value paired with the span it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }

    pub fn as_ref(&self) -> Spanned<&T> {
        Spanned {
            value: &self.value,
            span: self.span,
        }
    }
}

/// A parsed argument field.
///
/// `Absent` is a valid shorthand omission; `Errored` records where parsing
/// gave up so later fields still carry a position for editor tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field<T> {
    Present(Spanned<T>),
    Absent,
    Errored(Span),
}

impl<T> Field<T> {
    pub fn present(value: Spanned<T>) -> Self {
        Self::Present(value)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The parsed value, if the field parsed successfully.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(spanned) => Some(&spanned.value),
            _ => None,
        }
    }

    /// The field's position in source, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Present(spanned) => Some(spanned.span),
            Self::Absent => None,
            Self::Errored(span) => Some(*span),
        }
    }

    /// Lowers into the bare model, dropping spans and error states.
    pub fn lower(&self) -> Option<T>
    where
        T: Clone,
    {
        self.value().cloned()
    }

    /// Marks a still-absent field as errored at `span`.
    pub fn mark_errored(&mut self, span: Span) {
        if matches!(self, Self::Absent) {
            *self = Self::Errored(span);
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both_spans() {
        let a = Span::new(3, 7);
        let b = Span::new(5, 12);
        assert_eq!(a.union(b), Span::new(3, 12));
        assert_eq!(b.union(a), Span::new(3, 12));
    }

    #[test]
    fn contains_is_half_open() {
        let span = Span::new(2, 5);
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
        assert!(span.touches(5));
    }

    #[test]
    fn field_mark_errored_only_touches_absent() {
        let mut field: Field<i64> = Field::Absent;
        field.mark_errored(Span::point(4));
        assert_eq!(field, Field::Errored(Span::point(4)));

        let mut field = Field::present(Spanned::new(1, Span::new(0, 1)));
        field.mark_errored(Span::point(4));
        assert!(field.is_present());
    }
}
