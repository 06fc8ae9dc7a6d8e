//! Compression quality settings shared by the chunk producer and the composer.

use core::fmt;
use core::str::FromStr;

use flate2::Compression;

use crate::marker::Terminal;

/// Space/CPU trade-off applied to a deflate session.
///
/// The quality also decides which empty final block legally terminates the
/// content it produced, see [`Quality::terminal`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Quality {
    /// Favour the best possible compression ratio.
    #[default]
    Maximum,
    /// Favour speed over compression ratio.
    Fast,
    /// Emit stored (uncompressed) deflate blocks.
    Store,
}

impl Quality {
    const ALL: [Self; 3] = [Self::Maximum, Self::Fast, Self::Store];

    /// Returns the canonical lowercase name used for display and parsing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Maximum => "maximum",
            Self::Fast => "fast",
            Self::Store => "store",
        }
    }

    /// Returns every quality in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Reports whether this quality emits stored blocks.
    #[must_use]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }

    /// Returns the terminal marker that closes content produced at this quality.
    #[must_use]
    pub const fn terminal(self) -> Terminal {
        Terminal::for_quality(self)
    }
}

impl From<Quality> for Compression {
    fn from(quality: Quality) -> Self {
        match quality {
            Quality::Maximum => Self::best(),
            Quality::Fast => Self::fast(),
            Quality::Store => Self::none(),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a quality name cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QualityParseError {
    input: String,
}

impl QualityParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for QualityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression quality: {}", self.input)
    }
}

impl std::error::Error for QualityParseError {}

impl FromStr for Quality {
    type Err = QualityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maximum" | "max" | "best" | "optimal" => Ok(Self::Maximum),
            "fast" | "fastest" => Ok(Self::Fast),
            "store" | "stored" | "none" => Ok(Self::Store),
            other => Err(QualityParseError::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quality_is_maximum() {
        assert_eq!(Quality::default(), Quality::Maximum);
    }

    #[test]
    fn qualities_map_to_flate2_levels() {
        assert_eq!(Compression::from(Quality::Maximum).level(), 9);
        assert_eq!(Compression::from(Quality::Fast).level(), 1);
        assert_eq!(Compression::from(Quality::Store).level(), 0);
    }

    #[test]
    fn only_store_reports_stored_blocks() {
        assert!(Quality::Store.is_store());
        assert!(!Quality::Maximum.is_store());
        assert!(!Quality::Fast.is_store());
    }

    #[test]
    fn parsing_accepts_names_and_aliases() {
        for quality in Quality::all() {
            assert_eq!(quality.name().parse::<Quality>().unwrap(), *quality);
        }
        assert_eq!("BEST".parse::<Quality>().unwrap(), Quality::Maximum);
        assert_eq!(" fastest ".parse::<Quality>().unwrap(), Quality::Fast);
        assert_eq!("none".parse::<Quality>().unwrap(), Quality::Store);
    }

    #[test]
    fn parsing_rejects_unknown_names() {
        let err = "ultra".parse::<Quality>().expect_err("ultra unsupported");
        assert_eq!(err.input(), "ultra");
        assert_eq!(err.to_string(), "unsupported compression quality: ultra");
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Quality::Store.to_string(), "store");
    }
}
