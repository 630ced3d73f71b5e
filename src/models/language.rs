//! Language identifiers understood by the EAN-Search.org API.

use std::fmt;

/// A language filter for lookups and searches.
///
/// The service identifies languages by small integer codes; [`Language::Any`]
/// disables language filtering. Codes without a named variant travel as
/// [`Language::Other`].
///
/// # Example
///
/// ```rust
/// use ean_search::Language;
///
/// assert_eq!(Language::German.code(), 3);
/// assert_eq!(Language::from_code(99), Some(Language::Any));
/// assert_eq!(Language::English.to_string(), "1");
/// assert_eq!(Language::from(7), Language::Other(7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// English (1).
    English,
    /// Danish (2).
    Danish,
    /// German (3).
    German,
    /// Spanish (4).
    Spanish,
    /// Finnish (5).
    Finnish,
    /// French (6).
    French,
    /// Italian (8).
    Italian,
    /// Dutch (10).
    Dutch,
    /// Norwegian (11).
    Norwegian,
    /// Polish (12).
    Polish,
    /// Portuguese (13).
    Portuguese,
    /// Swedish (15).
    Swedish,
    /// No language filter (99).
    Any,
    /// Any other code, sent as is.
    Other(u32),
}

impl Language {
    const ALL: [Self; 13] = [
        Self::English,
        Self::Danish,
        Self::German,
        Self::Spanish,
        Self::Finnish,
        Self::French,
        Self::Italian,
        Self::Dutch,
        Self::Norwegian,
        Self::Polish,
        Self::Portuguese,
        Self::Swedish,
        Self::Any,
    ];

    /// Returns the numeric code sent on the wire.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::English => 1,
            Self::Danish => 2,
            Self::German => 3,
            Self::Spanish => 4,
            Self::Finnish => 5,
            Self::French => 6,
            Self::Italian => 8,
            Self::Dutch => 10,
            Self::Norwegian => 11,
            Self::Polish => 12,
            Self::Portuguese => 13,
            Self::Swedish => 15,
            Self::Any => 99,
            Self::Other(code) => code,
        }
    }

    /// Looks up a named language by its numeric code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.code() == code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<u32> for Language {
    fn from(code: u32) -> Self {
        Self::from_code(code).unwrap_or(Self::Other(code))
    }
}

impl From<Language> for u32 {
    fn from(language: Language) -> Self {
        language.code()
    }
}
