use anyhow::{Context, Result};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dense_linalg::config::EigenConfig;
use dense_linalg::eigen::jacobi;
use dense_linalg::math::Matrix;
use dense_linalg::reduction::{mean, std, Axis};
use dense_linalg::regression::least_squares;
use dense_linalg::stats::cov;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default().filter_or("DENSE_LINALG_LOG", "info"))
        .init();

    // Synthetic dataset: 200 samples, 3 correlated features and a noisy target
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 200;
    let mut data = Vec::with_capacity(n * 3);
    let mut target = Vec::with_capacity(n);
    for _ in 0..n {
        let a: f64 = rng.gen_range(-1.0..1.0);
        let b: f64 = rng.gen_range(-1.0..1.0);
        let c = 0.8 * a + 0.2 * rng.gen_range(-1.0..1.0);
        data.extend_from_slice(&[a, b, c]);
        target.push(1.5 * a - 2.0 * b + 0.5 * c + 0.01 * rng.gen_range(-1.0..1.0));
    }
    let x = Matrix::from_shape_vec((n, 3), data).context("failed to create feature matrix")?;
    let y = Matrix::from_vec(target)?;

    println!("X shape: {:?}", x.shape());
    println!("column means: {}", mean(&x, Axis::PerColumn)?);
    println!("column std (dof=1): {}", std(&x, 1, Axis::PerColumn)?);

    let c = cov(&x)?;
    println!("covariance: {}", c);

    let eig = jacobi(&c, &EigenConfig::default())?.sorted()?;
    let total: f64 = eig.values.iter().sum();
    for (i, value) in eig.values.iter().enumerate().rev() {
        println!(
            "component {}: eigenvalue {:.4} ({:.1}% of variance), direction {:?}",
            i,
            value,
            100.0 * value / total,
            eig.vector(i)?
        );
    }
    log::info!("eigensolver used {} sweeps", eig.sweeps);

    let theta = least_squares(&x, &y).context("least squares fit failed")?;
    println!("fitted coefficients: {}", theta);

    Ok(())
}
