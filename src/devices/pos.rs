//! Point-of-sale display beside the gate.

use std::fmt::{self, Display, Write};

/// Three-row point-of-sale display.
///
/// Row buffers are reused between updates, so once they have grown to fit
/// the longest message, setting rows does not allocate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PosTerminal {
    rows: [String; 3],
}

impl PosTerminal {
    /// Replace all three rows. Pass `""` for a blank row.
    pub fn set_rows(&mut self, first: impl Display, second: impl Display, third: impl Display) {
        let [a, b, c] = &mut self.rows;
        fill(a, first);
        fill(b, second);
        fill(c, third);
    }

    pub fn rows(&self) -> [&str; 3] {
        let [a, b, c] = &self.rows;
        [a.as_str(), b.as_str(), c.as_str()]
    }

    pub fn first_row(&self) -> &str {
        &self.rows[0]
    }

    pub fn second_row(&self) -> &str {
        &self.rows[1]
    }

    pub fn third_row(&self) -> &str {
        &self.rows[2]
    }
}

fn fill(row: &mut String, value: impl Display) {
    row.clear();
    // Writing into a String cannot fail.
    let _ = write!(row, "{value}");
}

/// Rows joined as `first, second, third`.
impl Display for PosTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.rows();
        write!(f, "{a}, {b}, {c}")
    }
}
