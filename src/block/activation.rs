use serde::{Serialize, Deserialize};
use std::f64::consts::E;

use crate::block::Block;
use crate::error::{NetError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    Identity,
    Sigmoid,
    Tanh,
    LeakyReLU { alpha: f64 },
}

impl Default for ActivationFunction {
    fn default() -> Self {
        ActivationFunction::ReLU
    }
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    /// Element-wise derivative, evaluated at the pre-activation input `x`.
    ///
    /// ReLU uses 0 as its sub-gradient at exactly `x == 0`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }
}

/// A parameterless 1 -> 1 block applying an `ActivationFunction`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activation {
    pub function: ActivationFunction,
    #[serde(skip)]
    input: Option<f64>,
    #[serde(skip)]
    output: f64,
    #[serde(skip)]
    input_gradient: f64,
}

impl Activation {
    pub fn new(function: ActivationFunction) -> Activation {
        Activation { function, input: None, output: 0.0, input_gradient: 0.0 }
    }

    pub fn relu() -> Activation {
        Activation::new(ActivationFunction::ReLU)
    }

    pub fn input(&self) -> Option<f64> {
        self.input
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn input_gradient(&self) -> f64 {
        self.input_gradient
    }

    fn scalar(input: &[f64]) -> Result<f64> {
        match input {
            [x] => Ok(*x),
            _ => Err(NetError::DimensionMismatch {
                context: "activation input",
                expected: 1,
                got: input.len(),
            }),
        }
    }
}

impl Block for Activation {
    fn input_dim(&self) -> usize {
        1
    }

    fn evaluate(&self, input: &[f64]) -> Result<f64> {
        Ok(self.function.function(Activation::scalar(input)?))
    }

    fn forward(&mut self, input: &[f64]) -> Result<f64> {
        let x = Activation::scalar(input)?;
        self.input = Some(x);
        self.output = self.function.function(x);
        Ok(self.output)
    }

    fn backward(&mut self, output_gradient: f64) -> Result<Vec<f64>> {
        let x = self.input.ok_or(NetError::BackwardBeforeForward("activation"))?;
        self.input_gradient = output_gradient * self.function.derivative(x);
        Ok(vec![self.input_gradient])
    }
}
