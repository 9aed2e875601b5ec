use kmeanspp::*;
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kmeanspp=info")))
        .init();

    // Three blobs in 2D
    let mut rnd = StdRng::seed_from_u64(1337);
    let centers = [[0.0, 0.0], [8.0, 1.0], [3.0, 9.0]];
    let points: Vec<ClusterableVector<f64>> = (0..600)
        .map(|i| {
            let c = centers[i % centers.len()];
            ClusterableVector::new(vec![c[0] + rnd.gen_range(-2.0..2.0), c[1] + rnd.gen_range(-2.0..2.0)])
        })
        .collect();

    // Scan k and report the mean silhouette of each partition
    for k in 2..=6 {
        let conf = KMeansConfig::build()
            .init_done(&|s| println!("k={} seeded, cluster sizes: {:?}", s.k, s.centroid_frequency))
            .iteration_done(&|_, nr, residual| println!("  iteration {} - residual: {:.4}", nr, residual))
            .random_generator(StdRng::seed_from_u64(42))
            .build();
        let mut kmean = match KMeansPP::with_config(k, points.clone(), EuclideanDistance, conf) {
            Ok(kmean) => kmean,
            Err(e) => { eprintln!("k={}: {}", k, e); continue; }
        };
        let (converged, score) = kmean.perform_silhouette_analysis();
        println!("k={} converged={} after {} iterations - mean silhouette: {:.3}",
            k, converged, kmean.state().iterations, score);
        if let Some(clusters) = kmean.get_clusters() {
            for cluster in clusters {
                println!("  centroid {} at {:.2?}: {} members", cluster.slot, cluster.centroid.coordinates(), cluster.members.len());
            }
        }
    }
}
