//! Text rendering of the neighbor table.
//!
//! Produces the fixed-column status listing printed by operators and
//! periodic loggers: one header line, one row per tracked neighbor,
//! attacker flags rendered as 1/0.

use std::fmt::Write;

use crate::table::NeighborTable;

impl NeighborTable {
    /// Render the full table listing.
    ///
    /// Layout: a leading newline, then a header row, then one row per
    /// neighbor in first-seen order. The address column is 30 characters
    /// left-aligned; the five count/flag columns are 5 characters
    /// right-aligned.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "\n{:<30}{:>5}{:>5}{:>5}{:>5}{:>5}\n",
            "Neighbor", "DIO", "DAO", "DIS", "DIOA", "DISA"
        );
        for entry in self.entries() {
            let _ = write!(
                out,
                "{:<30}{:>5}{:>5}{:>5}{:>5}{:>5}\n",
                entry.addr.to_string(),
                entry.dio_count,
                entry.dao_count,
                entry.dis_count,
                u8::from(entry.dio_attacker),
                u8::from(entry.dis_attacker),
            );
        }
        out
    }

    /// Render into a bounded budget of `max_len` bytes.
    ///
    /// Returns the (possibly truncated) text together with the length the
    /// full render requires, so a caller with a too-small buffer can learn
    /// the size it actually needs. Truncation never splits a character.
    pub fn render_truncated(&self, max_len: usize) -> (String, usize) {
        let mut text = self.render();
        let required = text.len();
        if required > max_len {
            let mut cut = max_len;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }
        (text, required)
    }
}
