use super::*;

const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Displays a byte count with SI (power of 1000) units, e.g. `1.7 kB`, `83 MB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HumanBytes(pub i64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let bytes = self.0.unsigned_abs();
        if bytes < 10 {
            return write!(f, "{sign}{bytes} B");
        }

        let mut exp = 0;
        let mut scale = 1_u64;
        while exp + 1 < UNITS.len() && bytes / scale >= 1000 {
            scale *= 1000;
            exp += 1;
        }

        let value = (bytes as f64 / scale as f64 * 10.0 + 0.5).floor() / 10.0;
        let unit = UNITS[exp];
        if value < 10.0 {
            write!(f, "{sign}{value:.1} {unit}")
        } else {
            write!(f, "{sign}{value:.0} {unit}")
        }
    }
}
