use crate::SeariseError;
use num_traits::{Float, FromPrimitive};

/// Constant per-year rate of change between two known values.
pub fn rate<T>(
    v_early: T,
    v_late: T,
    year_early: i32,
    year_late: i32,
) -> Result<T, SeariseError>
where
    T: Float + FromPrimitive,
{
    if year_late <= year_early {
        return Err(SeariseError::InvalidRange(year_early, year_late));
    }
    let span = T::from_i32(year_late - year_early).unwrap();
    Ok((v_late - v_early) / span)
}

/// Projects a known value to `year_target` at a constant rate.
pub fn extrapolate<T>(v_known: T, rate: T, year_known: i32, year_target: i32) -> T
where
    T: Float + FromPrimitive,
{
    v_known + rate * T::from_i32(year_target - year_known).unwrap()
}

#[cfg(test)]
mod tests {
    use super::{extrapolate, rate};
    use crate::SeariseError;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_over_ipcc_interval() {
        let rate = rate(0.55, 0.86, 2100, 2150).unwrap();
        assert_relative_eq!(rate, 0.0062, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolate_to_2300() {
        assert_relative_eq!(
            extrapolate(0.86, 0.0062, 2150, 2300),
            1.79,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_extrapolate_backwards_in_time() {
        assert_relative_eq!(
            extrapolate(0.86, 0.0062, 2150, 2100),
            0.55,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rate_rejects_non_increasing_years() {
        assert!(matches!(
            rate(0.55, 0.86, 2150, 2150),
            Err(SeariseError::InvalidRange(2150, 2150))
        ));
        assert!(matches!(
            rate(0.55, 0.86, 2150, 2100),
            Err(SeariseError::InvalidRange(2150, 2100))
        ));
    }
}
