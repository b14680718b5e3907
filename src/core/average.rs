/// Arithmetic mean of the present rates, or `0.0` when there are none.
pub fn average(rates: &[Option<f64>]) -> f64 {
    let (sum, count) = rates
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), rate| (sum + rate, count + 1));

    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}
