use ferrite_blocks::data::synthetic;
use ferrite_blocks::Network;

fn main() -> ferrite_blocks::Result<()> {
    let mut network = Network::with_seed(2, 1, 42)?;
    network
        .add_neuron_layer(4)?
        .add_activation_layer()?
        .add_neuron_layer(1)?
        .set_loss()?;

    let dataset = synthetic::product_plus_linear(50, 42)?;
    let losses = network.train(&dataset, 20, 1e-4)?;

    for (epoch, loss) in losses.iter().enumerate() {
        println!("Epoch {}: loss = {loss:.6}", epoch + 1);
    }

    let probes = vec![vec![0.0, 0.0], vec![0.5, 0.5], vec![1.0, 1.0]];
    for (input, output) in probes.iter().zip(network.run(&probes)?) {
        let target = synthetic::product_plus_linear_target(input[0], input[1]);
        println!("{input:?} -> {:.4} (target {target:.4})", output[0]);
    }
    Ok(())
}
