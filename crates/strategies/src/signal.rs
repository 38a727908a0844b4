// In crates/strategies/src/signal.rs

use crate::error::{Error, Result};
use core_types::{InputRow, Signal, SignalRow};

/// Compares a close against its trailing mean.
///
/// An undefined mean, or a missing close, never signals.
pub fn classify(close: f64, trailing_mean: Option<f64>) -> Signal {
    match trailing_mean {
        Some(mean) if close > mean => Signal::Long,
        _ => Signal::Flat,
    }
}

/// Pairs every row with its trailing mean and derives the signal.
pub fn generate_signals(rows: &[InputRow], trailing_means: &[Option<f64>]) -> Result<Vec<SignalRow>> {
    if rows.len() != trailing_means.len() {
        return Err(Error::LengthMismatch {
            rows: rows.len(),
            means: trailing_means.len(),
        });
    }

    Ok(rows
        .iter()
        .zip(trailing_means)
        .map(|(row, mean)| SignalRow {
            close: row.close,
            trailing_mean: *mean,
            signal: classify(row.close, *mean),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rolling::trailing_means;

    #[test]
    fn test_classify() {
        assert_eq!(classify(12.0, Some(10.0)), Signal::Long);
        assert_eq!(classify(10.0, Some(10.0)), Signal::Flat);
        assert_eq!(classify(9.0, Some(10.0)), Signal::Flat);
        assert_eq!(classify(100.0, None), Signal::Flat);
        assert_eq!(classify(f64::NAN, Some(10.0)), Signal::Flat);
    }

    #[test]
    fn test_generate_signals_for_reference_series() {
        let closes = [10.0, 11.0, 9.0, 12.0, 13.0];
        let rows: Vec<InputRow> = closes.iter().map(|close| InputRow::new(*close)).collect();
        let means = trailing_means(&closes, 3).unwrap();

        let signals: Vec<u8> = generate_signals(&rows, &means)
            .unwrap()
            .iter()
            .map(|row| row.signal.value())
            .collect();

        assert_eq!(signals, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_warm_up_rows_never_signal() {
        // Strictly rising prices would signal on every row with a defined mean.
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let rows: Vec<InputRow> = closes.iter().map(|close| InputRow::new(*close)).collect();
        let means = trailing_means(&closes, 4).unwrap();
        let signals = generate_signals(&rows, &means).unwrap();

        assert!(signals[..3].iter().all(|row| row.signal == Signal::Flat));
        assert!(signals[3..].iter().all(|row| row.signal == Signal::Long));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let rows = vec![InputRow::new(1.0), InputRow::new(2.0)];
        let err = generate_signals(&rows, &[None]).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { rows: 2, means: 1 });
    }
}
