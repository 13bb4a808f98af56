use ferrite_blocks::data::synthetic;
use ferrite_blocks::{train_loop, ActivationFunction, LossType, Network, TrainConfig};

fn main() -> ferrite_blocks::Result<()> {
    let mut network = Network::with_seed(2, 1, 7)?;
    network
        .add_neuron_layer(4)?
        .add_activation_layer_with(ActivationFunction::Tanh)?
        .add_neuron_layer(1)?
        .add_activation_layer_with(ActivationFunction::Sigmoid)?
        .set_loss_with(LossType::Mse)?;

    let dataset = synthetic::xor();
    let config = TrainConfig::new(10000, 0.5).with_log_interval(1000);

    for stats in train_loop(&mut network, &dataset, &config)?.iter().step_by(1000) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    for (input, output) in dataset.inputs().iter().zip(network.run(&dataset.inputs())?) {
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
    Ok(())
}
