use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// One (input, expected output) training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, expected: Vec<f64>) -> Example {
        Example { input, expected }
    }
}

/// An ordered, non-empty set of examples sharing the same input and output widths.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub(crate) examples: Vec<Example>,
}

impl Dataset {
    pub fn new(examples: Vec<Example>) -> Result<Dataset> {
        let first = examples.first().ok_or(NetError::EmptyDataset)?;
        let (n_in, n_out) = (first.input.len(), first.expected.len());
        for ex in &examples {
            if ex.input.len() != n_in {
                return Err(NetError::DimensionMismatch {
                    context: "dataset input",
                    expected: n_in,
                    got: ex.input.len(),
                });
            }
            if ex.expected.len() != n_out {
                return Err(NetError::DimensionMismatch {
                    context: "dataset expected output",
                    expected: n_out,
                    got: ex.expected.len(),
                });
            }
        }
        Ok(Dataset { examples })
    }

    pub fn from_pairs(inputs: Vec<Vec<f64>>, expected: Vec<Vec<f64>>) -> Result<Dataset> {
        if inputs.len() != expected.len() {
            return Err(NetError::DimensionMismatch {
                context: "dataset pair count",
                expected: inputs.len(),
                got: expected.len(),
            });
        }
        Dataset::new(inputs.into_iter().zip(expected).map(|(i, e)| Example::new(i, e)).collect())
    }

    /// Number of examples; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn input_dim(&self) -> usize {
        self.examples[0].input.len()
    }

    pub fn output_dim(&self) -> usize {
        self.examples[0].expected.len()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    pub fn inputs(&self) -> Vec<Vec<f64>> {
        self.examples.iter().map(|e| e.input.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(Dataset::new(vec![]), Err(NetError::EmptyDataset)));
        assert!(matches!(Dataset::from_pairs(vec![], vec![]), Err(NetError::EmptyDataset)));
    }

    #[test]
    fn test_ragged_inputs_rejected() {
        let result = Dataset::new(vec![
            Example::new(vec![1.0, 2.0], vec![0.0]),
            Example::new(vec![1.0], vec![0.0]),
        ]);
        assert!(matches!(result, Err(NetError::DimensionMismatch { expected: 2, got: 1, .. })));
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let ds = Dataset::from_pairs(
            vec![vec![1.0], vec![2.0], vec![3.0]],
            vec![vec![10.0], vec![20.0], vec![30.0]],
        )
        .unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!((ds.input_dim(), ds.output_dim()), (1, 1));
        let expected: Vec<f64> = ds.iter().map(|e| e.expected[0]).collect();
        assert_eq!(expected, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_from_pairs_length_mismatch() {
        assert!(Dataset::from_pairs(vec![vec![1.0]], vec![]).is_err());
    }
}
