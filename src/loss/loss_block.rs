use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::loss::{Loss, LossType};

/// A `Loss` backed by one of the element-wise measures in `LossType`.
///
/// Expected data is single-use: `forward` consumes whatever `set_expected_data`
/// stored, so every example has to supply its own target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LossBlock {
    pub loss_type: LossType,
    input_dim: usize,
    #[serde(skip)]
    pending: Option<Vec<f64>>,
    #[serde(skip)]
    expected: Option<Vec<f64>>,
    #[serde(skip)]
    input: Option<Vec<f64>>,
    #[serde(skip)]
    output: f64,
}

impl LossBlock {
    pub fn new(loss_type: LossType, input_dim: usize) -> LossBlock {
        LossBlock {
            loss_type,
            input_dim,
            pending: None,
            expected: None,
            input: None,
            output: 0.0,
        }
    }

    pub fn l2(input_dim: usize) -> LossBlock {
        LossBlock::new(LossType::L2, input_dim)
    }

    /// Value returned by the last `forward`.
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Computes the loss without consuming the stored expected data.
    pub fn evaluate(&self, input: &[f64], expected: &[f64]) -> Result<f64> {
        self.check(input, "loss input")?;
        self.check(expected, "loss expected data")?;
        Ok(self.loss_type.value(input, expected))
    }

    fn check(&self, v: &[f64], context: &'static str) -> Result<()> {
        if v.len() != self.input_dim {
            return Err(NetError::DimensionMismatch {
                context,
                expected: self.input_dim,
                got: v.len(),
            });
        }
        Ok(())
    }
}

impl Loss for LossBlock {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn set_expected_data(&mut self, expected: &[f64]) -> Result<()> {
        self.check(expected, "loss expected data")?;
        self.pending = Some(expected.to_vec());
        Ok(())
    }

    fn forward(&mut self, input: &[f64]) -> Result<f64> {
        let expected = self.pending.take().ok_or(NetError::MissingExpectedData)?;
        self.check(input, "loss input")?;
        self.output = self.loss_type.value(input, &expected);
        self.input = Some(input.to_vec());
        self.expected = Some(expected);
        Ok(self.output)
    }

    fn backward(&mut self) -> Result<Vec<f64>> {
        let input = self.input.as_ref().ok_or(NetError::BackwardBeforeForward("loss"))?;
        let expected = self.expected.as_ref().ok_or(NetError::MissingExpectedData)?;
        Ok(self.loss_type.gradient(input, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_zero_discrepancy() {
        let mut loss = LossBlock::l2(2);
        loss.set_expected_data(&[1.0, 2.0]).unwrap();
        assert_eq!(loss.forward(&[1.0, 2.0]).unwrap(), 0.0);
        assert_eq!(loss.backward().unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_l2_round_trip() {
        let mut loss = LossBlock::l2(2);
        loss.set_expected_data(&[1.0, 1.0]).unwrap();
        assert_eq!(loss.forward(&[3.0, 1.0]).unwrap(), 4.0);
        assert_eq!(loss.output(), 4.0);
        assert_eq!(loss.backward().unwrap(), vec![4.0, 0.0]);
    }

    #[test]
    fn test_forward_without_expected_data_fails() {
        let mut loss = LossBlock::l2(1);
        assert!(matches!(loss.forward(&[1.0]), Err(NetError::MissingExpectedData)));
    }

    #[test]
    fn test_expected_data_is_consumed_per_example() {
        let mut loss = LossBlock::l2(1);
        loss.set_expected_data(&[0.0]).unwrap();
        loss.forward(&[2.0]).unwrap();
        // backward still sees the example that was just evaluated
        assert_eq!(loss.backward().unwrap(), vec![4.0]);
        assert!(matches!(loss.forward(&[2.0]), Err(NetError::MissingExpectedData)));
    }

    #[test]
    fn test_failed_forward_still_consumes_expected_data() {
        let mut loss = LossBlock::l2(1);
        loss.set_expected_data(&[5.0]).unwrap();
        assert!(matches!(loss.forward(&[1.0, 2.0]), Err(NetError::DimensionMismatch { .. })));
        assert!(matches!(loss.forward(&[1.0]), Err(NetError::MissingExpectedData)));
    }

    #[test]
    fn test_backward_before_forward_fails() {
        let mut loss = LossBlock::l2(1);
        loss.set_expected_data(&[0.0]).unwrap();
        assert!(matches!(loss.backward(), Err(NetError::BackwardBeforeForward(_))));
    }

    #[test]
    fn test_expected_width_is_checked() {
        let mut loss = LossBlock::l2(2);
        assert!(matches!(
            loss.set_expected_data(&[1.0]),
            Err(NetError::DimensionMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_evaluate_leaves_state_alone() {
        let loss = LossBlock::new(LossType::Mse, 2);
        assert_eq!(loss.evaluate(&[3.0, 1.0], &[1.0, 1.0]).unwrap(), 2.0);
    }
}
