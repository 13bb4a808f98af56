use crate::{
    data::Dataset,
    error::Result,
    network::network::Network,
};

/// One pass of per-example SGD over `dataset`, in dataset order.
/// Returns the mean of the losses observed before each update.
pub fn train_epoch(network: &mut Network, dataset: &Dataset, learning_rate: f64) -> Result<f64> {
    let mut total_loss = 0.0;

    for example in dataset {
        // forward -> loss -> backward -> update, one example at a time
        total_loss += network.train_example(example, learning_rate)?;
    }

    Ok(total_loss / dataset.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Example};
    use crate::layers::NeuronLayer;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_epoch_loss_is_mean_before_update() {
        let mut net = Network::with_seed(1, 1, 0).unwrap();
        net.push_layer(NeuronLayer::from_parameters(1, vec![(vec![1.0], 0.0)]).unwrap())
            .unwrap()
            .set_loss()
            .unwrap();
        let ds = Dataset::new(vec![
            Example::new(vec![1.0], vec![3.0]),
            Example::new(vec![2.0], vec![2.0]),
        ])
        .unwrap();

        // With a zero rate the parameters never move: losses are 4 and 0.
        let loss = train_epoch(&mut net, &ds, 0.0).unwrap();
        assert_abs_diff_eq!(loss, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_step_moves_towards_target() {
        let mut net = Network::with_seed(1, 1, 0).unwrap();
        net.push_layer(NeuronLayer::from_parameters(1, vec![(vec![1.0], 0.0)]).unwrap())
            .unwrap()
            .set_loss()
            .unwrap();
        let ds = Dataset::new(vec![Example::new(vec![1.0], vec![3.0])]).unwrap();

        train_epoch(&mut net, &ds, 0.1).unwrap();
        // gradient 2·(1 − 3) = −4 on both weight (x = 1) and bias
        let params = net.parameters();
        assert_abs_diff_eq!(params[0].0[0], 1.4, epsilon = 1e-12);
        assert_abs_diff_eq!(params[0].1, 0.4, epsilon = 1e-12);
    }
}
