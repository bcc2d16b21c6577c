// Distance-driven walk cycle counter and its phase table

use serde::Serialize;

/// One quarter of the walk cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseBand {
    First,
    Second,
    Third,
    Fourth,
}

/// Per-limb rotation increments (fractions of π) for one movement step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbDeltas {
    pub left_leg: f64,
    pub left_lower_leg: f64,
    pub right_leg: f64,
    pub right_lower_leg: f64,
    pub left_arm: f64,
    pub left_forearm: f64,
    pub right_arm: f64,
    pub right_forearm: f64,
}

const ARMS_FORWARD: [f64; 4] = [0.01, 0.01, -0.01, -0.01];
const ARMS_BACK: [f64; 4] = [-0.01, -0.01, 0.01, 0.01];

impl PhaseBand {
    pub fn index(self) -> usize {
        self as usize
    }

    fn from_index(i: u64) -> Self {
        match i {
            0 => PhaseBand::First,
            1 => PhaseBand::Second,
            2 => PhaseBand::Third,
            _ => PhaseBand::Fourth,
        }
    }

    /// Legs step through the table; arms swing against them in two halves
    pub fn deltas(self) -> LimbDeltas {
        // left leg, left lower leg, right leg, right lower leg
        let legs = match self {
            PhaseBand::First => [0.0175, 0.0, -0.005, -0.01],
            PhaseBand::Second => [-0.01, -0.01, 0.0, 0.0],
            PhaseBand::Third => [-0.015, 0.015, 0.0125, 0.0175],
            // undoes the sum of the first three bands
            PhaseBand::Fourth => [
                -(0.0175 - 0.01 - 0.015),
                -(-0.01 + 0.015),
                -(-0.005 + 0.0125),
                -(-0.01 + 0.0175),
            ],
        };
        let arms = match self {
            PhaseBand::Second | PhaseBand::Third => ARMS_BACK,
            PhaseBand::First | PhaseBand::Fourth => ARMS_FORWARD,
        };
        LimbDeltas {
            left_leg: legs[0],
            left_lower_leg: legs[1],
            right_leg: legs[2],
            right_lower_leg: legs[3],
            left_arm: arms[0],
            left_forearm: arms[1],
            right_arm: arms[2],
            right_forearm: arms[3],
        }
    }
}

/// Accumulated movement units, wrapped into `[0, cycle_length)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkCycle {
    total_units: i64,
    cycle_length: u32,
}

impl WalkCycle {
    /// Shortest cycle that still gives every band one unit
    pub const MIN_LENGTH: u32 = 4;

    pub fn new(cycle_length: u32) -> Self {
        if cycle_length < Self::MIN_LENGTH {
            log::warn!(
                "Walk cycle length {cycle_length} too short, using {}",
                Self::MIN_LENGTH
            );
        }
        Self {
            total_units: 0,
            cycle_length: cycle_length.max(Self::MIN_LENGTH),
        }
    }

    pub fn advance(&mut self, units: i64) {
        self.total_units = self.total_units.saturating_add(units);
    }

    pub fn total_units(&self) -> i64 {
        self.total_units
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// Normalised counter; negative totals wrap from the top
    pub fn position(&self) -> u32 {
        self.total_units.rem_euclid(i64::from(self.cycle_length)) as u32
    }

    pub fn band(&self) -> PhaseBand {
        let quarter = u64::from(self.position()) * 4 / u64::from(self.cycle_length);
        PhaseBand::from_index(quarter)
    }

    pub fn reset(&mut self) {
        self.total_units = 0;
    }
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self::new(80)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_contiguous_quarters() {
        let mut cycle = WalkCycle::default();
        let mut seen = Vec::new();
        for _ in 0..80 {
            seen.push(cycle.band());
            cycle.advance(1);
        }
        assert_eq!(seen[0], PhaseBand::First);
        assert_eq!(seen[19], PhaseBand::First);
        assert_eq!(seen[20], PhaseBand::Second);
        assert_eq!(seen[39], PhaseBand::Second);
        assert_eq!(seen[40], PhaseBand::Third);
        assert_eq!(seen[60], PhaseBand::Fourth);
        assert_eq!(seen[79], PhaseBand::Fourth);
        assert_eq!(cycle.position(), 0);
    }

    #[test]
    fn negative_totals_wrap_from_the_top() {
        let mut cycle = WalkCycle::default();
        cycle.advance(-1);
        assert_eq!(cycle.position(), 79);
        assert_eq!(cycle.band(), PhaseBand::Fourth);
        cycle.advance(-80);
        assert_eq!(cycle.position(), 79);
    }

    #[test]
    fn position_stays_in_range() {
        let mut cycle = WalkCycle::default();
        for units in [3, -7, 150, -400, 1, 0, -1, 79, 81, -161] {
            cycle.advance(units);
            assert!(cycle.position() < cycle.cycle_length());
        }
    }

    #[test]
    fn short_cycles_are_widened() {
        assert_eq!(WalkCycle::new(1).cycle_length(), WalkCycle::MIN_LENGTH);
    }

    #[test]
    fn leg_deltas_sum_to_zero_over_a_cycle() {
        let bands = [
            PhaseBand::First,
            PhaseBand::Second,
            PhaseBand::Third,
            PhaseBand::Fourth,
        ];
        let sum = bands.iter().fold(LimbDeltas::default(), |acc, b| {
            let d = b.deltas();
            LimbDeltas {
                left_leg: acc.left_leg + d.left_leg,
                left_lower_leg: acc.left_lower_leg + d.left_lower_leg,
                right_leg: acc.right_leg + d.right_leg,
                right_lower_leg: acc.right_lower_leg + d.right_lower_leg,
                left_arm: acc.left_arm + d.left_arm,
                ..acc
            }
        });
        assert!(sum.left_leg.abs() < 1e-12);
        assert!(sum.left_lower_leg.abs() < 1e-12);
        assert!(sum.right_leg.abs() < 1e-12);
        assert!(sum.right_lower_leg.abs() < 1e-12);
        assert!(sum.left_arm.abs() < 1e-12);
    }
}
