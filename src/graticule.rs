//! Tick positions for a map graticule.
//!
//! Parallels start at the rounded southern edge and meridians at the rounded
//! western edge, then step by a fixed spacing up to (excluding) the opposite
//! edge. Parallels are labeled on the left axis, meridians on the bottom one.
//! Only the positions are computed here; drawing is up to the caller.

use crate::bbox::Bbox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub positions: Vec<f64>,
    pub label_side: LabelSide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graticule {
    pub parallels: Ticks,
    pub meridians: Ticks,
}

/// Upper bound on the number of ticks along one axis.
pub const MAX_TICKS: usize = 10_000;

impl Graticule {
    pub fn new(bbox: &Bbox, dlon: f64, dlat: f64) -> Result<Self, String> {
        Ok(Graticule {
            parallels: Ticks {
                positions: arange(bbox.ymin.round_ties_even(), bbox.ymax, dlat)?,
                label_side: LabelSide::Left,
            },
            meridians: Ticks {
                positions: arange(bbox.xmin.round_ties_even(), bbox.xmax, dlon)?,
                label_side: LabelSide::Bottom,
            },
        })
    }
}

/// Evenly spaced values in `[start, stop)`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, String> {
    if !(step.is_finite() && step > 0.0) {
        return Err(format!("step must be a positive finite number, got {}", step));
    }
    if stop <= start {
        return Ok(Vec::new());
    }

    let count = ((stop - start) / step).ceil();
    if !count.is_finite() || count > MAX_TICKS as f64 {
        return Err(format!(
            "step {} over [{}, {}) gives more than {} ticks",
            step, start, stop, MAX_TICKS
        ));
    }

    Ok((0..count as usize).map(|i| start + i as f64 * step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arange_excludes_stop() {
        assert_eq!(arange(0.0, 3.0, 1.0).unwrap(), vec![0.0, 1.0, 2.0]);
        assert_eq!(arange(0.0, 3.5, 1.0).unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
        assert!(arange(3.0, 3.0, 1.0).unwrap().is_empty());
        assert!(arange(0.0, 3.0, 0.0).is_err());
        assert!(arange(0.0, 3.0, f64::NAN).is_err());
    }

    #[test]
    fn test_tiny_step_is_rejected() {
        assert!(arange(35.0, 38.0, 1e-300).is_err());

        let bbox = Bbox::new(-6.0, 1.0, 35.0, 38.0).unwrap();
        assert!(Graticule::new(&bbox, 1.0, 1e-300).is_err());
        assert!(Graticule::new(&bbox, 1e-300, 1.0).is_err());
    }

    #[test]
    fn test_graticule_for_alboran_sea() {
        let bbox = Bbox::new(-5.7, 0.6, 35.2, 38.0).unwrap();

        let g = Graticule::new(&bbox, 1.0, 0.5).unwrap();

        assert_eq!(g.meridians.positions, vec![-6.0, -5.0, -4.0, -3.0, -2.0, -1.0, 0.0]);
        assert_eq!(
            g.parallels.positions,
            vec![35.0, 35.5, 36.0, 36.5, 37.0, 37.5]
        );
        assert_eq!(g.parallels.label_side, LabelSide::Left);
        assert_eq!(g.meridians.label_side, LabelSide::Bottom);
    }

    #[test]
    fn test_start_rounds_half_to_even() {
        let bbox = Bbox::new(2.5, 6.0, 36.5, 39.0).unwrap();

        let g = Graticule::new(&bbox, 1.0, 1.0).unwrap();

        assert_eq!(g.meridians.positions[0], 2.0);
        assert_eq!(g.parallels.positions[0], 36.0);
    }
}
