use argh::FromArgs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use planar::homography::{
    self as ph, Correspondence, DegreeMatrix, HomographyEstimationParams, HomographyMatrix,
    Point2D, ReprojectionReport,
};
use planar::optim::NelderMead;

#[derive(FromArgs)]
/// Estimate a planar homography from point correspondences stored in a JSON file
struct Args {
    /// path to the input JSON file
    #[argh(option)]
    input: PathBuf,

    /// optimizer convergence tolerance, overrides the input file
    #[argh(option)]
    tolerance: Option<f64>,

    /// maximum number of optimizer iterations, overrides the input file
    #[argh(option)]
    max_iterations: Option<usize>,

    /// path to write the homography and the reports as JSON
    #[argh(option)]
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Input {
    scene_points: Vec<Point2D>,
    image_points: Vec<Point2D>,
    #[serde(default)]
    degree_matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    holdout_scene_points: Vec<Point2D>,
    #[serde(default)]
    holdout_image_points: Vec<Point2D>,
    #[serde(default)]
    optimizer: NelderMead,
}

#[derive(Serialize)]
struct Output {
    homography: HomographyMatrix,
    cost: f64,
    iterations: usize,
    fit: ReprojectionReport,
    holdout: Option<ReprojectionReport>,
}

fn print_report(title: &str, report: &ReprojectionReport) {
    println!("{title}:");
    for (i, p) in report.points.iter().enumerate() {
        println!(
            "  #{i}: scene ({:.4}, {:.4}) -> projected ({:.4}, {:.4}), actual ({:.4}, {:.4}), error {:.6}",
            p.scene.x, p.scene.y, p.projected.x, p.projected.y, p.actual.x, p.actual.y, p.error
        );
    }
    println!(
        "  total {:.6}, mean {:.6}, max {:.6}, rmse {:.6}",
        report.total_error, report.mean_error, report.max_error, report.rmse
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let input: Input = serde_json::from_str(&std::fs::read_to_string(&args.input)?)?;

    let mut optimizer = input.optimizer;
    if let Some(tolerance) = args.tolerance {
        optimizer.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        optimizer.max_iterations = max_iterations;
    }
    let params = HomographyEstimationParams {
        optimizer,
        ..Default::default()
    };

    let (estimate, correspondences) = match &input.degree_matrix {
        Some(rows) => {
            let degree = DegreeMatrix::from_rows(rows)?;
            ph::estimate_homography_with_degree_matrix(
                &input.scene_points,
                &input.image_points,
                &degree,
                &params,
            )?
        }
        None => {
            let correspondences = Correspondence::zip(&input.scene_points, &input.image_points)?;
            (ph::estimate_homography(&correspondences, &params)?, correspondences)
        }
    };

    println!(
        "Homography ({} iterations, cost {:e}):",
        estimate.iterations, estimate.cost
    );
    println!("{}", estimate.homography);

    let fit = ph::validate_homography(&estimate.homography, &correspondences)?;
    print_report("Fit", &fit);

    let holdout = if input.holdout_scene_points.is_empty() && input.holdout_image_points.is_empty()
    {
        None
    } else {
        let holdout =
            Correspondence::zip(&input.holdout_scene_points, &input.holdout_image_points)?;
        let report = ph::validate_homography(&estimate.homography, &holdout)?;
        print_report("Hold-out", &report);
        Some(report)
    };

    if let Some(path) = args.output {
        let output = Output {
            homography: estimate.homography,
            cost: estimate.cost,
            iterations: estimate.iterations,
            fit,
            holdout,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&output)?)?;
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}
