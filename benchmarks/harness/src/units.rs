//! Human-scaled byte counts (base 1000).

use std::fmt;

/// Byte count rendered as `N bytes`, `x.xx KB`, `x.xx MB` or `x.xx GB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HumanBytes(pub u64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0;
        #[allow(clippy::cast_precision_loss)]
        let x = n as f64;
        match n {
            0..=999 => write!(f, "{n} bytes"),
            1_000..=999_999 => write!(f, "{:.2} KB", x / 1e3),
            1_000_000..=999_999_999 => write!(f, "{:.2} MB", x / 1e6),
            _ => write!(f, "{:.2} GB", x / 1e9),
        }
    }
}
