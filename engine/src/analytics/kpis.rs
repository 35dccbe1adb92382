use serde::Serialize;
use shared::brazilian_format::{format_brl, format_count, format_percent};
use shared::CanonicalRow;

/// `100 * part / whole`, or 0 when `whole` is not positive. No rounding.
pub fn pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub issued_value: f64,
    pub settled_value: f64,
    pub issued_count: f64,
    pub settled_count: f64,
    /// Settled value as a percentage of issued value.
    pub settlement_rate: f64,
}

impl Kpis {
    pub fn compute(rows: &[CanonicalRow]) -> Self {
        let mut kpis = rows.iter().fold(Kpis::default(), |mut acc, row| {
            acc.issued_value += row.issued_value;
            acc.settled_value += row.settled_value;
            acc.issued_count += row.issued_count;
            acc.settled_count += row.settled_count;
            acc
        });
        kpis.settlement_rate = pct(kpis.settled_value, kpis.issued_value);
        kpis
    }

    // pt-BR rendering, rate rounded to one decimal
    pub fn display_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Issued value", format_brl(self.issued_value)),
            ("Settled value", format_brl(self.settled_value)),
            ("Settlement rate", format_percent(self.settlement_rate)),
            (
                "Settled / issued count",
                format!("{} / {}", format_count(self.settled_count), format_count(self.issued_count)),
            ),
        ]
    }
}
