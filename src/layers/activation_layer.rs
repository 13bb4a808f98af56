use serde::{Deserialize, Serialize};

use crate::block::{Activation, ActivationFunction, Block};
use crate::error::{NetError, Result};

/// One activation per incoming scalar; input and output widths are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationLayer {
    pub blocks: Vec<Activation>,
}

impl ActivationLayer {
    pub fn new(width: usize, function: ActivationFunction) -> ActivationLayer {
        ActivationLayer { blocks: (0..width).map(|_| Activation::new(function)).collect() }
    }

    pub fn relu(width: usize) -> ActivationLayer {
        ActivationLayer::new(width, ActivationFunction::ReLU)
    }

    pub fn width(&self) -> usize {
        self.blocks.len()
    }

    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check(input, "activation layer input")?;
        self.blocks.iter().zip(input.iter()).map(|(b, x)| b.evaluate(&[*x])).collect()
    }

    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.check(input, "activation layer input")?;
        self.blocks.iter_mut().zip(input.iter()).map(|(b, x)| b.forward(&[*x])).collect()
    }

    pub fn backward(&mut self, output_gradient: &[f64]) -> Result<Vec<f64>> {
        self.check(output_gradient, "activation layer output gradient")?;
        let mut input_gradient = Vec::with_capacity(self.blocks.len());
        for (block, &g) in self.blocks.iter_mut().zip(output_gradient.iter()) {
            input_gradient.extend(block.backward(g)?);
        }
        Ok(input_gradient)
    }

    fn check(&self, v: &[f64], context: &'static str) -> Result<()> {
        if v.len() != self.blocks.len() {
            return Err(NetError::DimensionMismatch {
                context,
                expected: self.blocks.len(),
                got: v.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relu_layer_is_one_to_one() {
        let mut layer = ActivationLayer::relu(3);
        assert_eq!(layer.forward(&[-1.0, 0.0, 2.0]).unwrap(), vec![0.0, 0.0, 2.0]);
        assert_eq!(layer.backward(&[5.0, 5.0, 5.0]).unwrap(), vec![0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_width_is_checked() {
        let mut layer = ActivationLayer::relu(2);
        assert!(layer.forward(&[1.0]).is_err());
        assert!(layer.evaluate(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_other_functions() {
        let layer = ActivationLayer::new(2, ActivationFunction::LeakyReLU { alpha: 0.5 });
        assert_eq!(layer.evaluate(&[-2.0, 2.0]).unwrap(), vec![-1.0, 2.0]);
    }
}
