//! IPCC AR6 sea level rise constants and the series derived from them.
//!
//! Projection ranges are medium-confidence values in meters above the
//! 1995-2014 baseline, per pathway and reference year.

use crate::{extrapolate, rate, SeariseError};
use demgrid::C;
use serde::Serialize;
use std::fmt;

/// One emissions pathway bounding a projection range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pathway {
    /// SSP1-1.9
    LowEmissions,
    /// SSP5-8.5
    HighEmissions,
}

impl Pathway {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LowEmissions => "SSP1-1.9",
            Self::HighEmissions => "SSP5-8.5",
        }
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Projected rise for one pathway at one reference year [m].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RiseRange {
    pub lower: C,
    pub upper: C,
}

/// Years with tabulated projection ranges.
pub const REFERENCE_YEARS: [i32; 3] = [2050, 2100, 2150];

/// Years projected past the table by linear extrapolation.
pub const EXTRAPOLATION_YEARS: [i32; 2] = [2300, 2500];

/// Low-confidence high-end rise by 2100 [m].
pub const HIGH_END_2100: C = 2.0;

/// Low-confidence high-end rise by 2150 [m].
pub const HIGH_END_2150: C = 5.0;

/// Observed rise over 1900-2018 [m].
pub const HISTORICAL_RISE_1900_2018: C = 0.20;

/// Satellite-era rise rate [mm/yr].
pub const CURRENT_RATE_MM_PER_YEAR: C = 3.7;

/// 20th-century mean rise rate [mm/yr].
pub const HISTORICAL_RATE_MM_PER_YEAR: C = 1.3;

/// Offset from the 1900 datum to the 1995-2014 baseline [m].
pub const BASELINE_ADJUSTMENT_1900: C = 0.158;

/// End-of-century warming per scenario [degrees C].
pub const SCENARIO_WARMING_C: [(&str, C); 3] =
    [("SSP1-1.9", 1.4), ("SSP2-4.5", 2.7), ("SSP5-8.5", 4.4)];

/// Tabulated projection range for `(year, pathway)`, or `None` for a
/// year outside [`REFERENCE_YEARS`].
pub fn projected_range(year: i32, pathway: Pathway) -> Option<RiseRange> {
    use Pathway::{HighEmissions, LowEmissions};
    let (lower, upper) = match (year, pathway) {
        (2050, LowEmissions) => (0.15, 0.23),
        (2050, HighEmissions) => (0.20, 0.29),
        (2100, LowEmissions) => (0.28, 0.55),
        (2100, HighEmissions) => (0.63, 1.01),
        (2150, LowEmissions) => (0.37, 0.86),
        (2150, HighEmissions) => (0.98, 1.88),
        _ => return None,
    };
    Some(RiseRange { lower, upper })
}

/// Table lookup for a year known to be in [`REFERENCE_YEARS`].
fn range_at(year: i32, pathway: Pathway) -> RiseRange {
    projected_range(year, pathway).expect("reference-year table entry")
}

/// Upper-bound projection series for `pathway` over 2050..2500.
///
/// The first three points are table data; 2300 and 2500 extrapolate
/// the 2100 to 2150 trend.
pub fn upper_bound_series(pathway: Pathway) -> Result<Vec<(i32, C)>, SeariseError> {
    let rate = rate(
        range_at(2100, pathway).upper,
        range_at(2150, pathway).upper,
        2100,
        2150,
    )?;
    let known = range_at(2150, pathway).upper;

    let mut series: Vec<(i32, C)> = REFERENCE_YEARS
        .iter()
        .map(|&year| (year, range_at(year, pathway).upper))
        .collect();
    for &year in &EXTRAPOLATION_YEARS {
        series.push((year, extrapolate(known, rate, 2150, year)));
    }
    Ok(series)
}

/// Sea levels driving one column of the flooding mosaic [m].
#[derive(Clone, Copy, Debug)]
pub struct FloodScenario {
    pub year: i32,
    pub low_m: C,
    pub medium_m: C,
    pub high_m: C,
}

/// Flood scenarios for 2100, 2300, and 2500.
///
/// The low cell is the optimistic end of the SSP1-1.9 range (its lower
/// bound at 2100, the extrapolated upper bound past the table), the
/// high cell is the pessimistic end of SSP5-8.5, and medium is the
/// midpoint of the two.
pub fn flood_scenarios() -> Result<[FloodScenario; 3], SeariseError> {
    use Pathway::{HighEmissions, LowEmissions};

    let low_rate = rate(
        range_at(2100, LowEmissions).upper,
        range_at(2150, LowEmissions).upper,
        2100,
        2150,
    )?;
    let high_rate = rate(
        range_at(2100, HighEmissions).upper,
        range_at(2150, HighEmissions).upper,
        2100,
        2150,
    )?;

    let cell = |year: i32| -> (C, C) {
        if year == 2100 {
            (
                range_at(2100, LowEmissions).lower,
                range_at(2100, HighEmissions).upper,
            )
        } else {
            (
                extrapolate(range_at(2150, LowEmissions).upper, low_rate, 2150, year),
                extrapolate(range_at(2150, HighEmissions).upper, high_rate, 2150, year),
            )
        }
    };

    Ok([2100, 2300, 2500].map(|year| {
        let (low_m, high_m) = cell(year);
        FloodScenario {
            year,
            low_m,
            medium_m: (low_m + high_m) / 2.0,
            high_m,
        }
    }))
}

/// The full constant table in one serializable value.
#[derive(Debug, Serialize)]
pub struct SeaLevelData {
    pub projections_m: Vec<YearProjection>,
    pub high_end_m: HighEnd,
    pub historical: Historical,
    pub scenario_warming_c: Vec<Warming>,
}

#[derive(Debug, Serialize)]
pub struct YearProjection {
    pub year: i32,
    pub low_emissions: RiseRange,
    pub high_emissions: RiseRange,
}

#[derive(Debug, Serialize)]
pub struct HighEnd {
    pub year_2100: C,
    pub year_2150: C,
}

#[derive(Debug, Serialize)]
pub struct Historical {
    pub total_rise_since_1900_m: C,
    pub current_rate_mm_per_year: C,
    pub historical_rate_mm_per_year: C,
    pub baseline_adjustment_m: C,
}

#[derive(Debug, Serialize)]
pub struct Warming {
    pub scenario: &'static str,
    pub degrees_c: C,
}

pub fn dataset() -> SeaLevelData {
    let projections_m = REFERENCE_YEARS
        .iter()
        .filter_map(|&year| {
            Some(YearProjection {
                year,
                low_emissions: projected_range(year, Pathway::LowEmissions)?,
                high_emissions: projected_range(year, Pathway::HighEmissions)?,
            })
        })
        .collect();

    SeaLevelData {
        projections_m,
        high_end_m: HighEnd {
            year_2100: HIGH_END_2100,
            year_2150: HIGH_END_2150,
        },
        historical: Historical {
            total_rise_since_1900_m: HISTORICAL_RISE_1900_2018,
            current_rate_mm_per_year: CURRENT_RATE_MM_PER_YEAR,
            historical_rate_mm_per_year: HISTORICAL_RATE_MM_PER_YEAR,
            baseline_adjustment_m: BASELINE_ADJUSTMENT_1900,
        },
        scenario_warming_c: SCENARIO_WARMING_C
            .iter()
            .map(|&(scenario, degrees_c)| Warming {
                scenario,
                degrees_c,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        dataset, flood_scenarios, projected_range, upper_bound_series, Pathway, EXTRAPOLATION_YEARS,
        REFERENCE_YEARS,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_table_ranges_are_ordered() {
        for &year in &REFERENCE_YEARS {
            let low = projected_range(year, Pathway::LowEmissions).unwrap();
            let high = projected_range(year, Pathway::HighEmissions).unwrap();
            assert!(low.lower <= low.upper);
            assert!(high.lower <= high.upper);
            // The high pathway bounds the low pathway at every year.
            assert!(high.lower >= low.lower);
            assert!(high.upper >= low.upper);
        }
    }

    #[test]
    fn test_unknown_year_has_no_range() {
        assert_eq!(projected_range(2300, Pathway::LowEmissions), None);
    }

    #[test]
    fn test_upper_bound_series_values() {
        let low = upper_bound_series(Pathway::LowEmissions).unwrap();
        let high = upper_bound_series(Pathway::HighEmissions).unwrap();

        assert_eq!(low.len(), REFERENCE_YEARS.len() + EXTRAPOLATION_YEARS.len());
        assert_relative_eq!(low[1].1, 0.55, epsilon = 1e-12);
        assert_relative_eq!(low[3].1, 1.79, epsilon = 1e-12);
        assert_relative_eq!(low[4].1, 3.03, epsilon = 1e-12);
        assert_relative_eq!(high[3].1, 4.49, epsilon = 1e-12);
        assert_relative_eq!(high[4].1, 7.97, epsilon = 1e-12);

        // Monotonic consistency holds by construction of the table.
        for (l, h) in low.iter().zip(high.iter()) {
            assert_eq!(l.0, h.0);
            assert!(h.1 >= l.1);
        }
    }

    #[test]
    fn test_flood_scenario_cells() {
        let scenarios = flood_scenarios().unwrap();
        assert_eq!(scenarios[0].year, 2100);
        assert_relative_eq!(scenarios[0].low_m, 0.28, epsilon = 1e-12);
        assert_relative_eq!(scenarios[0].high_m, 1.01, epsilon = 1e-12);
        assert_relative_eq!(scenarios[1].low_m, 1.79, epsilon = 1e-12);
        assert_relative_eq!(scenarios[2].high_m, 7.97, epsilon = 1e-12);

        // Medium is always the midpoint of its year's low and high.
        for scenario in &scenarios {
            assert_relative_eq!(
                scenario.medium_m,
                (scenario.low_m + scenario.high_m) / 2.0,
                epsilon = 1e-12
            );
            assert!(scenario.low_m <= scenario.medium_m);
            assert!(scenario.medium_m <= scenario.high_m);
        }
    }

    #[test]
    fn test_dataset_serializes() {
        let json = serde_json::to_string(&dataset()).unwrap();
        assert!(json.contains("\"projections_m\""));
        assert!(json.contains("\"high_end_m\""));
        assert!(json.contains("\"SSP2-4.5\""));
    }
}
