//! CSS dimension values: [`Dimension`], [`Unit`] and the numeric token parser.
//!
//! [`parse_dimension`] classifies one numeric token into a `(value, unit)`
//! pair. The caller passes [`ParseFlags`] naming which unit categories the
//! property accepts; anything else is reported as a [`ParseError`] without
//! consuming the token.

use std::fmt;

use bitflags::bitflags;

use crate::css::cursor::TokenCursor;
use crate::css::tokenizer::{Location, Token, TokenizeError};

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// The kind of quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Number,
    Percentage,
    Length,
    Angle,
    Time,
}

impl UnitCategory {
    /// The parse flag that admits this category.
    pub fn flag(self) -> ParseFlags {
        match self {
            UnitCategory::Number => ParseFlags::NUMBER,
            UnitCategory::Percentage => ParseFlags::PERCENT,
            UnitCategory::Length => ParseFlags::LENGTH,
            UnitCategory::Angle => ParseFlags::ANGLE,
            UnitCategory::Time => ParseFlags::TIME,
        }
    }
}

/// A CSS unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Unit-less number.
    Number,
    Percent,
    Px,
    Pt,
    Em,
    Ex,
    Rem,
    Pc,
    In,
    Cm,
    Mm,
    Rad,
    Deg,
    Grad,
    Turn,
    S,
    Ms,
}

/// Unit suffixes accepted after a number, matched case-insensitively.
const UNIT_NAMES: [(&str, Unit); 15] = [
    ("px", Unit::Px),
    ("pt", Unit::Pt),
    ("em", Unit::Em),
    ("ex", Unit::Ex),
    ("rem", Unit::Rem),
    ("pc", Unit::Pc),
    ("in", Unit::In),
    ("cm", Unit::Cm),
    ("mm", Unit::Mm),
    ("rad", Unit::Rad),
    ("deg", Unit::Deg),
    ("grad", Unit::Grad),
    ("turn", Unit::Turn),
    ("s", Unit::S),
    ("ms", Unit::Ms),
];

impl Unit {
    /// Look up a unit suffix, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Unit> {
        UNIT_NAMES
            .iter()
            .find(|(unit_name, _)| unit_name.eq_ignore_ascii_case(name))
            .map(|&(_, unit)| unit)
    }

    /// The suffix printed after a value in this unit.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Number => "",
            Unit::Percent => "%",
            Unit::Px => "px",
            Unit::Pt => "pt",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Rem => "rem",
            Unit::Pc => "pc",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Rad => "rad",
            Unit::Deg => "deg",
            Unit::Grad => "grad",
            Unit::Turn => "turn",
            Unit::S => "s",
            Unit::Ms => "ms",
        }
    }

    pub fn category(self) -> UnitCategory {
        match self {
            Unit::Number => UnitCategory::Number,
            Unit::Percent => UnitCategory::Percentage,
            Unit::Px
            | Unit::Pt
            | Unit::Em
            | Unit::Ex
            | Unit::Rem
            | Unit::Pc
            | Unit::In
            | Unit::Cm
            | Unit::Mm => UnitCategory::Length,
            Unit::Rad | Unit::Deg | Unit::Grad | Unit::Turn => UnitCategory::Angle,
            Unit::S | Unit::Ms => UnitCategory::Time,
        }
    }
}

bitflags! {
    /// Which values a call site accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u32 {
        const NUMBER = 1 << 0;
        const PERCENT = 1 << 1;
        const LENGTH = 1 << 2;
        const ANGLE = 1 << 3;
        const TIME = 1 << 4;
        /// Reject values below zero.
        const POSITIVE_ONLY = 1 << 5;
    }
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// A number with a resolved unit, e.g. `10px`, `50%`, `1.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// A unit-less number.
    pub const fn number(value: f64) -> Self {
        Self::new(value, Unit::Number)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, Unit::Px)
    }

    pub fn category(&self) -> UnitCategory {
        self.unit.category()
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.name())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing a dimension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("{location}: percentages are not allowed here")]
    UnitNotAllowed { location: Location },
    #[error("{location}: unit is missing")]
    MissingUnit { location: Location },
    #[error("{location}: '{unit}' is not a valid unit")]
    UnknownUnit { unit: String, location: Location },
    #[error("{location}: negative values are not allowed")]
    NegativeNotAllowed { location: Location },
    #[error("{location}: expected a number, found {found}")]
    ExpectedNumber { found: String, location: Location },
    #[error("{location}: unexpected '{found}' after value")]
    UnexpectedTrailing { found: String, location: Location },
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

impl ParseError {
    /// Where in the source the error was found.
    pub fn location(&self) -> Location {
        match self {
            ParseError::UnitNotAllowed { location }
            | ParseError::MissingUnit { location }
            | ParseError::UnknownUnit { location, .. }
            | ParseError::NegativeNotAllowed { location }
            | ParseError::ExpectedNumber { location, .. }
            | ParseError::UnexpectedTrailing { location, .. } => *location,
            ParseError::Tokenize(err) => err.location(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Unit for a bare `0`, in tie-break order: the most specific allowed unit.
fn zero_unit(flags: ParseFlags) -> Option<Unit> {
    if flags.contains(ParseFlags::NUMBER) {
        Some(Unit::Number)
    } else if flags.contains(ParseFlags::LENGTH) {
        Some(Unit::Px)
    } else if flags.contains(ParseFlags::ANGLE) {
        Some(Unit::Deg)
    } else if flags.contains(ParseFlags::TIME) {
        Some(Unit::S)
    } else if flags.contains(ParseFlags::PERCENT) {
        Some(Unit::Percent)
    } else {
        None
    }
}

/// Classify the current token without touching the cursor.
fn classify(cursor: &TokenCursor, flags: ParseFlags) -> Result<Dimension, ParseError> {
    let location = cursor.location();
    let Some(token) = cursor.peek() else {
        return Err(ParseError::ExpectedNumber {
            found: "end of input".to_string(),
            location,
        });
    };

    let dimension = match &token.token {
        Token::Percentage(value) => {
            if !flags.contains(ParseFlags::PERCENT) {
                return Err(ParseError::UnitNotAllowed { location });
            }
            Dimension::percent(*value)
        }
        Token::Number(number) => {
            let unit = if number.value == 0.0 {
                zero_unit(flags)
            } else if flags.contains(ParseFlags::NUMBER) {
                Some(Unit::Number)
            } else {
                None
            };
            match unit {
                Some(unit) => Dimension::new(number.value, unit),
                None => return Err(ParseError::MissingUnit { location }),
            }
        }
        Token::Dimension { number, unit } => match Unit::from_name(unit) {
            Some(found) if flags.contains(found.category().flag()) => {
                Dimension::new(number.value, found)
            }
            _ => {
                return Err(ParseError::UnknownUnit {
                    unit: unit.clone(),
                    location,
                })
            }
        },
        other => {
            return Err(ParseError::ExpectedNumber {
                found: format!("{} '{}'", other.kind_name(), token.text),
                location,
            })
        }
    };

    if flags.contains(ParseFlags::POSITIVE_ONLY) && dimension.value < 0.0 {
        return Err(ParseError::NegativeNotAllowed { location });
    }

    Ok(dimension)
}

/// Parse the numeric token under `cursor` into a [`Dimension`].
///
/// On success the cursor moves past the token. On failure it is left where
/// it was.
pub fn parse_dimension(cursor: &mut TokenCursor, flags: ParseFlags) -> Result<Dimension, ParseError> {
    match classify(cursor, flags) {
        Ok(dimension) => {
            cursor.advance();
            log::trace!("parsed dimension {dimension}");
            Ok(dimension)
        }
        Err(err) => {
            log::debug!("dimension parse failed ({flags:?}): {err}");
            Err(err)
        }
    }
}

/// Parse a complete string holding exactly one dimension.
pub fn parse_dimension_str(input: &str, flags: ParseFlags) -> Result<Dimension, ParseError> {
    let mut cursor = TokenCursor::from_css(input)?;
    let dimension = parse_dimension(&mut cursor, flags)?;
    if let Some(extra) = cursor.peek() {
        return Err(ParseError::UnexpectedTrailing {
            found: extra.text.clone(),
            location: extra.location,
        });
    }
    Ok(dimension)
}
