use std::str::FromStr;
use ndarray::Array2;

use filt_dist::{DnsDistMat, Metric, SpsDistMat};
use filt_rips::{PersistenceDiagram, RipsInput};

use super::InputKind;
use crate::app::err::*;

pub fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}

pub fn guard_panic<F, R>(f: F) -> Result<R, Box<dyn std::error::Error>>
where F: FnOnce() -> Result<R, Box<dyn std::error::Error>> + std::panic::UnwindSafe {
    std::panic::catch_unwind(|| {
        f()
    }).unwrap_or_else(|e| {
        let info = match e.downcast::<String>() {
            Ok(v) => *v,
            Err(e) => match e.downcast::<&str>() {
                Ok(v) => v.to_string(),
                _ => "Unknown Source of Error".to_owned()
            }
        };
        err!("panic: {info}")
    })
}

pub fn load_input(path: &String, kind: InputKind, metric: Metric) -> Result<RipsInput, Box<dyn std::error::Error>> {
    let rows = read_csv(path)?;

    match kind {
        InputKind::Points => {
            let n = rows.len();
            let d = rows.first().map(|r| r.len()).unwrap_or(0);
            ensure!(rows.iter().all(|r| r.len() == d), "ragged rows in '{path}'.");

            let points = Array2::from_shape_fn((n, d), |(i, j)| rows[i][j]);
            Ok(RipsInput::Points(points, metric))
        },
        InputKind::Dense => {
            let n = rows.len();
            ensure!(rows.iter().all(|r| r.len() == n), "'{path}' is not a square matrix.");

            let mat = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
            let dm = DnsDistMat::try_from_array(mat)?;
            Ok(RipsInput::Dense(dm))
        },
        InputKind::Sparse => {
            let mut is = vec![];
            let mut js = vec![];
            let mut ds = vec![];

            for r in rows.iter() {
                ensure!(r.len() == 3, "sparse input rows must be `i,j,d` triplets.");
                ensure!(r[0] >= 0.0 && r[1] >= 0.0, "negative index in '{path}'.");
                ensure!(r[0].fract() == 0.0 && r[1].fract() == 0.0, "non-integer index in '{path}'.");
                is.push(r[0] as usize);
                js.push(r[1] as usize);
                ds.push(r[2]);
            }

            let n = is.iter().chain(js.iter()).max().map(|&m| m + 1).unwrap_or(0);
            let sm = SpsDistMat::from_triplets(n, &is, &js, &ds)?;
            Ok(RipsInput::Sparse(sm))
        }
    }
}

fn read_csv(path: &String) -> Result<Vec<Vec<f64>>, Box<dyn std::error::Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut rows = vec![];
    for rec in rdr.records() {
        let rec = rec?;
        let row = rec.iter()
            .filter(|s| !s.is_empty())
            .map(f64::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

pub fn save_csv(path: &String, dgm: &PersistenceDiagram) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv_writer(path)?;

    wtr.write_record(["dim", "birth", "death"])?;
    for i in dgm.iter() {
        wtr.write_record([
            i.dim.to_string(),
            i.birth.to_string(),
            i.death.to_string()
        ])?;
    }
    wtr.flush()?;

    Ok(())
}

pub fn csv_writer(path: &String) -> Result<csv::Writer<std::fs::File>, Box<dyn std::error::Error>> {
    use std::fs::OpenOptions;

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let wtr = csv::Writer::from_writer(file);

    Ok(wtr)
}
