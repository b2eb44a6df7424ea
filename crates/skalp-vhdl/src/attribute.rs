//! Supported VHDL attributes
//!
//! Only the attributes listed in [`AttributeKind`] are translated. Any
//! other attribute is reported as unsupported rather than guessed at.

use crate::ident::Ident;

/// Predefined attributes with a Verilog translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `'event` - the signal changed in the current delta
    Event,
    /// `'length` - number of elements
    Length,
    Left,
    Right,
    High,
    Low,
    /// `'range` - the declared range, `left` to `right`
    Range,
    /// `'reverse_range` - the declared range, `right` to `left`
    ReverseRange,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 8] = [
        AttributeKind::Event,
        AttributeKind::Length,
        AttributeKind::Left,
        AttributeKind::Right,
        AttributeKind::High,
        AttributeKind::Low,
        AttributeKind::Range,
        AttributeKind::ReverseRange,
    ];

    /// Attribute name as written after the tick
    pub fn vhdl_name(self) -> &'static str {
        match self {
            AttributeKind::Event => "event",
            AttributeKind::Length => "length",
            AttributeKind::Left => "left",
            AttributeKind::Right => "right",
            AttributeKind::High => "high",
            AttributeKind::Low => "low",
            AttributeKind::Range => "range",
            AttributeKind::ReverseRange => "reverse_range",
        }
    }

    /// Find an attribute by name, ignoring case
    pub fn lookup(name: Ident) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.eq_ignore_case(kind.vhdl_name()))
    }

    /// Verilog system functions applied to the base, joined by `:`
    pub(crate) fn verilog_calls(self) -> &'static [&'static str] {
        match self {
            AttributeKind::Event => &["$ivlh_attribute_event"],
            AttributeKind::Length => &["$bits"],
            AttributeKind::Left => &["$left"],
            AttributeKind::Right => &["$right"],
            AttributeKind::High => &["$high"],
            AttributeKind::Low => &["$low"],
            AttributeKind::Range => &["$left", "$right"],
            AttributeKind::ReverseRange => &["$right", "$left"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(
            AttributeKind::lookup(Ident::new("LENGTH")),
            Some(AttributeKind::Length)
        );
        assert_eq!(
            AttributeKind::lookup(Ident::new("Event")),
            Some(AttributeKind::Event)
        );
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(AttributeKind::lookup(Ident::new("image")), None);
        assert_eq!(AttributeKind::lookup(Ident::new("")), None);
    }

    #[test]
    fn test_every_kind_has_a_translation() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::lookup(Ident::new(kind.vhdl_name())), Some(kind));
            assert!(!kind.verilog_calls().is_empty());
        }
    }
}
