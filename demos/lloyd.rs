use kmeans_engine::*;
use rand::prelude::*;

fn main() -> Result<(), KMeansError> {
    let (sample_cnt, sample_dims, k) = (100, 2, 4);

    // Generate some random data
    let mut rnd = StdRng::seed_from_u64(0xC0FFEE);
    let samples = datagen::uniform_points(&mut rnd, sample_cnt, sample_dims, -3.0f64, 3.0);

    // Calculate kmeans, using kmeans++ as initialization-method
    let mut kmean = KMeans::new(&samples, sample_cnt, sample_dims, k)?;
    let conf = KMeansConfig::build().random_generator(rnd).build();
    let result = kmean.lloyd_converge_with(InitMethod::KMeansPlusPlus, None, &conf)?;

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster-Assignments: {:?}", result.assignments);
    println!("Iterations: {}", result.iterations);
    println!("Error: {}", result.distsum);
    Ok(())
}
