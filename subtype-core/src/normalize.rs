//! Text normalization applied to patterns and descriptions before matching.
//!
//! The default is literal, case-sensitive matching. Callers opt into looser
//! matching per resolver; the same mode is applied to both sides.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::error::UnknownNormalize;

/// How text is folded before substring comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Normalize {
    /// Byte-for-byte comparison
    #[default]
    #[serde(rename = "none")]
    None,
    /// Unicode lowercase
    #[serde(rename = "casefold")]
    Casefold,
    /// NFKD, drop combining marks, then lowercase ("INVERSIÓN" -> "inversion")
    #[serde(rename = "casefold+diacritic-strip")]
    CasefoldStripDiacritics,
}

impl Normalize {
    pub const ALL: [Normalize; 3] = [
        Normalize::None,
        Normalize::Casefold,
        Normalize::CasefoldStripDiacritics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Normalize::None => "none",
            Normalize::Casefold => "casefold",
            Normalize::CasefoldStripDiacritics => "casefold+diacritic-strip",
        }
    }

    /// Fold `input` according to this mode. Borrows when nothing changes.
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            Normalize::None => Cow::Borrowed(input),
            Normalize::Casefold => Cow::Owned(input.to_lowercase()),
            Normalize::CasefoldStripDiacritics => {
                let mut out = String::with_capacity(input.len());
                for ch in input.nfkd() {
                    if is_combining_mark(ch) {
                        continue;
                    }
                    out.extend(ch.to_lowercase());
                }
                Cow::Owned(out)
            }
        }
    }
}

impl fmt::Display for Normalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalize {
    type Err = UnknownNormalize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Normalize::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownNormalize(s.to_string()))
    }
}
