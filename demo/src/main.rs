use kdindex::cellular::{CellFunction, Cellular, CellularParams, DistanceFunction};
use kdindex::sampling::PointGenerator;
use std::io::Write;

const SIZE: usize = 128;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Pick the cell function from the first argument
    let cell_function = match std::env::args().nth(1).as_deref() {
        Some("f2") => CellFunction::F2,
        Some("f3") => CellFunction::F3,
        Some("constant") => CellFunction::Constant,
        Some("f2-f1") => CellFunction::F2MinusF1,
        _ => CellFunction::F1,
    };
    let params = CellularParams {
        cell_function,
        distance_function: DistanceFunction::Euclid,
        point_generator: PointGenerator::Random,
        num_points: 32,
        jitter: 0.25,
        random_color: cell_function == CellFunction::Constant,
        ..CellularParams::default()
    };
    let cellular = Cellular::new(params)?;
    let values = cellular.sample_grid(SIZE, SIZE)?;

    println!("Feature points: {}", cellular.params().num_points);
    println!("Stored points: {}", cellular.feature_points().len());
    println!("Tree depth: {}", cellular.feature_points().depth());

    std::fs::create_dir_all("demo/data")?;
    let filename = "demo/data/cellular.csv";
    let mut file = std::io::BufWriter::new(std::fs::File::create(filename)?);
    for row in values.chunks(SIZE) {
        let line = row
            .iter()
            .map(|value| format!("{value:.4}"))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    println!("Wrote {filename}");
    Ok(())
}
