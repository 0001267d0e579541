// File: crates/scaling-core/src/axis.rs
// Summary: Axis model with labels, ranges, and tick generation for year and log10 value axes.

use crate::grid::{log_decades, nice_step, step_ticks};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

/// One tick: data value and display text.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Linear }
    }

    pub fn log10(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Log10 }
    }

    /// Major ticks: whole-year steps on a linear axis, decades on a log axis.
    pub fn ticks(&self) -> Vec<Tick> {
        match self.kind {
            ScaleKind::Linear => {
                let step = nice_step(self.max - self.min, 10);
                step_ticks(self.min, self.max, step)
                    .into_iter()
                    .map(|v| Tick { value: v, label: format!("{v:.0}") })
                    .collect()
            }
            ScaleKind::Log10 => log_decades(self.min, self.max)
                .into_iter()
                .map(|k| Tick { value: 10f64.powi(k), label: decade_label(k) })
                .collect(),
        }
    }
}

/// `10` with a superscript exponent, e.g. `10³`, `10⁻¹`.
pub fn decade_label(k: i32) -> String {
    const SUP: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    let mut s = String::from("10");
    if k < 0 { s.push('⁻'); }
    for d in k.unsigned_abs().to_string().bytes() {
        s.push(SUP[(d - b'0') as usize]);
    }
    s
}
