use std::fmt;

use crate::data::model::FvDataset;

/// Reference V0 (m/s): literature mean for professional football players.
pub const V0_REF: f64 = 9.2;
/// Reference F0 (N/kg): literature mean for professional football players.
pub const F0_REF: f64 = 7.7;

// ---------------------------------------------------------------------------
// Quadrant
// ---------------------------------------------------------------------------

/// Performance quadrant of a (V0, F0) pair against the reference values.
/// Values equal to a reference count as "low".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    /// High V0, high F0 (top right).
    Q1,
    /// Low V0, high F0 (top left).
    Q2,
    /// High V0, low F0 (bottom right).
    Q3,
    /// Low V0, low F0 (bottom left).
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Q1, Quadrant::Q2, Quadrant::Q3, Quadrant::Q4];

    pub fn index(self) -> usize {
        match self {
            Quadrant::Q1 => 0,
            Quadrant::Q2 => 1,
            Quadrant::Q3 => 2,
            Quadrant::Q4 => 3,
        }
    }

    /// Short profile description for legends and tables.
    pub fn description(self) -> &'static str {
        match self {
            Quadrant::Q1 => "fast & strong",
            Quadrant::Q2 => "force-dominant",
            Quadrant::Q3 => "velocity-dominant",
            Quadrant::Q4 => "below both references",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quadrant {}", self.index() + 1)
    }
}

/// Classify a record. NaN compares as "not above", so it lands in the low side.
pub fn classify(v0: f64, f0: f64) -> Quadrant {
    match (v0 > V0_REF, f0 > F0_REF) {
        (true, true) => Quadrant::Q1,
        (false, true) => Quadrant::Q2,
        (true, false) => Quadrant::Q3,
        (false, false) => Quadrant::Q4,
    }
}

// ---------------------------------------------------------------------------
// Partition of a filtered view
// ---------------------------------------------------------------------------

/// Row indices grouped by quadrant, each group in the order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantGroups {
    groups: [Vec<usize>; 4],
}

impl QuadrantGroups {
    pub fn rows(&self, quadrant: Quadrant) -> &[usize] {
        &self.groups[quadrant.index()]
    }

    /// Total number of rows across the four groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `rows` into the four quadrants.
pub fn partition(dataset: &FvDataset, rows: &[usize]) -> QuadrantGroups {
    let mut out = QuadrantGroups::default();
    for &i in rows {
        let rec = &dataset.records[i];
        out.groups[classify(rec.v0, rec.f0).index()].push(i);
    }
    out
}
