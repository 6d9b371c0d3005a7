//! K-means, Cobweb and farthest-first on one dataset, scored side by side.
//!
//! Usage: `cargo run --example compare -- [path.csv] [class_index] [k]`
//!
//! Without a path, a synthetic three-cluster dataset is used. Set
//! `RUST_LOG=debug` to see per-algorithm diagnostics.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use clusterscore::evaluation::{
    AicScore, BicScore, ClusterEvaluation, SumOfAveragePairwiseSimilarities, SumOfSquaredErrors,
};
use clusterscore::io::load_delimited;
use clusterscore::{Clustering, Cobweb, Dataset, FarthestFirst, Instance, Kmeans};

#[derive(Debug, Parser)]
#[command(about = "Cluster a dataset three ways and score each partition")]
struct Args {
    /// Delimited data file; a synthetic dataset is used when omitted.
    path: Option<PathBuf>,
    /// Column holding the class label.
    class_index: Option<usize>,
    /// Clusters requested from k-means and farthest-first.
    #[arg(default_value_t = 3)]
    k: usize,
    /// Field separator of the data file.
    #[arg(short, long, default_value_t = ',')]
    separator: char,
}

fn synthetic() -> Dataset {
    // Three well-separated clusters in 2D.
    let points = [
        // Cluster A (near origin)
        ([0.0, 0.0], "A"),
        ([0.1, 0.2], "A"),
        ([0.2, 0.1], "A"),
        ([-0.1, 0.1], "A"),
        // Cluster B (near (5, 5))
        ([5.0, 5.0], "B"),
        ([5.1, 4.9], "B"),
        ([4.9, 5.1], "B"),
        ([5.2, 5.2], "B"),
        // Cluster C (near (10, 0))
        ([10.0, 0.0], "C"),
        ([10.1, 0.1], "C"),
        ([9.9, -0.1], "C"),
        ([10.2, 0.2], "C"),
    ];
    let instances = points
        .iter()
        .map(|(v, label)| Instance::with_label(v.to_vec(), *label))
        .collect();
    Dataset::new(instances).expect("rows have equal length")
}

fn main() -> clusterscore::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let data = match &args.path {
        Some(path) => load_delimited(path, args.class_index, args.separator)?,
        None => synthetic(),
    };
    let k = args.k;

    println!("Dataset loaded successfully!");
    println!("Number of instances: {}", data.len());
    println!("Number of attributes: {}\n", data.num_attributes());

    let clusterers: Vec<(&str, Box<dyn Clustering>)> = vec![
        ("Kmeans", Box::new(Kmeans::new(k))),
        ("Cobweb", Box::new(Cobweb::new())),
        ("Farthest-First", Box::new(FarthestFirst::new(k))),
    ];
    let scorers: Vec<(&str, Box<dyn ClusterEvaluation>)> = vec![
        ("AIC Score", Box::new(AicScore)),
        ("BIC Score", Box::new(BicScore)),
        ("Sum of Squared Errors", Box::new(SumOfSquaredErrors)),
        (
            "Pairwise Similarities",
            Box::new(SumOfAveragePairwiseSimilarities::new()),
        ),
    ];

    let mut runs: Vec<(&str, Vec<Dataset>, Duration)> = Vec::new();
    for (name, clusterer) in &clusterers {
        let start = Instant::now();
        let partition = clusterer.cluster(&data)?;
        runs.push((*name, partition, start.elapsed()));
    }

    for (name, partition, _) in &runs {
        println!("~ {name} clusters ~");
        for (i, cluster) in partition.iter().enumerate() {
            println!("Cluster {}:", i + 1);
            for instance in cluster {
                println!("{instance}");
            }
            println!();
        }
    }

    for (name, partition, elapsed) in &runs {
        println!("~ {name} ~");
        println!("Cluster Count: {}", partition.len());
        println!("Number of data points per cluster:");
        for (i, cluster) in partition.iter().enumerate() {
            println!("Cluster #{} --> {} data points", i + 1, cluster.len());
        }
        for (label, scorer) in &scorers {
            println!("{label}: {:.2}", scorer.score(partition)?);
        }
        println!("Time (ms): {:.3}", elapsed.as_secs_f64() * 1e3);
        println!();
    }

    Ok(())
}
