use crate::Strategy;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Strategy {
    /// Returns the short name of the strategy (for logging and reports).
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Raster => "raster",
            Strategy::Archive => "archive",
            Strategy::Deflate => "deflate",
        }
    }
}
