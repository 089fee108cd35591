use std::str::FromStr;
use derive_more::Display;
use ndarray::ArrayView1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum Metric {
    #[default]
    #[display("euclidean")]
    Euclidean,
    #[display("manhattan")]
    Manhattan,
    #[display("chebyshev")]
    Chebyshev,
    #[display("cosine")]
    Cosine,
}

impl Metric {
    pub fn eval(&self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        use Metric::*;
        match self {
            Euclidean => {
                x.iter().zip(y.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt()
            },
            Manhattan => {
                x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).sum()
            },
            Chebyshev => {
                x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
            },
            Cosine => {
                let (mut xy, mut xx, mut yy) = (0.0, 0.0, 0.0);
                for (a, b) in x.iter().zip(y.iter()) {
                    xy += a * b;
                    xx += a * a;
                    yy += b * b;
                }
                if xx == 0.0 || yy == 0.0 {
                    return 1.0
                }
                let d = 1.0 - xy / (xx.sqrt() * yy.sqrt());
                if d < 0.0 { 0.0 } else { d }
            }
        }
    }
}

impl FromStr for Metric {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            "chebyshev" => Ok(Metric::Chebyshev),
            "cosine"    => Ok(Metric::Cosine),
            _ => Err(format!("unknown metric: '{s}'"))
        }
    }
}
