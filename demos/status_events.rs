use kmeans_engine::*;
use rand::prelude::*;

fn main() -> Result<(), KMeansError> {
    let (sample_cnt, sample_dims, k) = (1000, 2, 8);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(1337);
    let samples = datagen::uniform_points(&mut rnd, sample_cnt, sample_dims, -3.0f64, 3.0);

    let init_done = |centroids: &[f64]| println!("Initialization completed: {:?}", centroids);
    let iteration_done = |nr: usize, _centroids: &[f64], distsum: f64| {
        println!("Iteration {} - Error: {:.2}", nr, distsum)
    };
    let conf = KMeansConfig::build()
        .init_done(&init_done)
        .iteration_done(&iteration_done)
        .random_generator(rnd)
        .max_iter(Some(100))
        .build();

    let mut kmean = KMeans::new(&samples, sample_cnt, sample_dims, k)?;
    let result = kmean.lloyd_converge_with(InitMethod::FarthestFirst, None, &conf)?;

    println!("Converged after {} iterations, error: {}", result.iterations, result.distsum);
    Ok(())
}
