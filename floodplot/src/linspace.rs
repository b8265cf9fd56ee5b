use num_traits::{Float, FromPrimitive};

/// `n` evenly spaced values over `[start, end]`.
pub fn linspace<T>(start: T, end: T, n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let dy = (end - start) / T::from_usize(n - 1).unwrap();
    (0..n).map(move |i| start + T::from_usize(i).unwrap() * dy)
}

#[cfg(test)]
mod tests {
    use super::linspace;

    #[test]
    fn test_linspace_endpoints() {
        let steps: Vec<f64> = linspace(0.0, 200.0, 5).collect();
        assert_eq!(steps, vec![0.0, 50.0, 100.0, 150.0, 200.0]);
    }
}
