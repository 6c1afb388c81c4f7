//! GOES class threshold catalogue: comparator, letter, magnitude.

/// Comparator applied to the class threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Strictly above.
    Greater,
    /// At or above.
    GreaterEq,
    /// Exactly.
    Equal,
    /// At or below.
    LessEq,
    /// Strictly below.
    Less,
    /// No class restriction.
    All,
}

/// Comparators in column order.
pub const COMPARATORS: [Comparator; 6] = [
    Comparator::Greater,
    Comparator::GreaterEq,
    Comparator::Equal,
    Comparator::LessEq,
    Comparator::Less,
    Comparator::All,
];

/// Class letters in ascending flux order.
pub const CLASS_LETTERS: [char; 5] = ['A', 'B', 'C', 'M', 'X'];

/// Magnitudes `0.0` through `9.9`.
pub const MAGNITUDE_COUNT: usize = 100;

/// Class value persisted when the comparator is `All`.
pub const ANY_CLASS: &str = "Any";

impl Comparator {
    /// Symbol shown in the editor column.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterEq => "≥",
            Self::Equal => "≡",
            Self::LessEq => "≤",
            Self::Less => "<",
            Self::All => "All",
        }
    }

    /// Value written to settings and passed to the query.
    pub fn value(self) -> &'static str {
        match self {
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Equal => "==",
            Self::LessEq => "<=",
            Self::Less => "<",
            Self::All => "All",
        }
    }

    /// Look up a persisted value.
    pub fn from_value(value: &str) -> Option<Self> {
        COMPARATORS.into_iter().find(|cmp| cmp.value() == value)
    }
}

/// Editor label for a magnitude position, `0` => `"0.0"`, `52` => `"5.2"`.
pub fn magnitude_label(index: usize) -> String {
    format!("{}.{}", index / 10, index % 10)
}

/// Pretty form of a persisted comparator for the summary panel.
pub fn comparator_display(value: &str) -> &str {
    match Comparator::from_value(value.trim()) {
        Some(cmp) => cmp.symbol(),
        None if value.trim().is_empty() => "<unset>",
        None => value,
    }
}

/// Editor positions recovered from persisted settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassSelection {
    /// Position in [`COMPARATORS`].
    pub comparator: usize,
    /// Position in [`CLASS_LETTERS`].
    pub letter: usize,
    /// Magnitude position, `0..MAGNITUDE_COUNT`.
    pub magnitude: usize,
}

impl ClassSelection {
    /// Recover editor positions from a comparator value and a class such as `M5.2`.
    ///
    /// Anything unrecognized falls back to the first option of that column.
    pub fn parse(comparator: &str, class: &str) -> Self {
        let comparator = COMPARATORS
            .iter()
            .position(|cmp| cmp.value() == comparator.trim())
            .unwrap_or(0);

        let mut chars = class.trim().chars();
        let letter = chars
            .next()
            .and_then(|c| CLASS_LETTERS.iter().position(|&l| l == c.to_ascii_uppercase()))
            .unwrap_or(0);

        let digits: Vec<u32> = chars.filter_map(|c| c.to_digit(10)).collect();
        let magnitude = match digits.as_slice() {
            [whole, tenth, ..] => (*whole as usize) * 10 + *tenth as usize,
            [whole] => (*whole as usize) * 10,
            [] => 0,
        };

        Self {
            comparator,
            letter,
            magnitude: magnitude.min(MAGNITUDE_COUNT - 1),
        }
    }

    /// Settings values `(comparator, class)` for this selection.
    pub fn to_values(self) -> (String, String) {
        let cmp = COMPARATORS[self.comparator.min(COMPARATORS.len() - 1)];
        if cmp == Comparator::All {
            return (cmp.value().to_string(), ANY_CLASS.to_string());
        }
        let letter = CLASS_LETTERS[self.letter.min(CLASS_LETTERS.len() - 1)];
        (
            cmp.value().to_string(),
            format!("{letter}{}", magnitude_label(self.magnitude)),
        )
    }
}
