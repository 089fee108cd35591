use filt::Coeff;
use filt::util::format::{fil_value, table};
use filt_dist::Metric;
use filt_rips::{rips, PersistenceDiagram, RipsParams};

use crate::app::utils::*;

pub fn dispatch(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    App::new(args.clone()).run()
}

#[derive(Clone, Debug, clap::Args)]
pub struct Args {
    pub input: String,

    #[arg(short, long, default_value = "points")]
    pub kind: InputKind,

    #[arg(short = 'd', long, default_value = "1")]
    pub max_dim: usize,

    #[arg(short = 't', long)]
    pub thresh: Option<f64>,

    #[arg(short, long, default_value = "2")]
    pub coeff: Coeff,

    #[arg(short, long, default_value = "euclidean")]
    pub metric: Metric,

    #[arg(short, long)]
    pub at: Option<f64>,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: String::new(),
            kind: InputKind::default(),
            max_dim: 1,
            thresh: None,
            coeff: 2,
            metric: Metric::default(),
            at: None,
            log: 0
        }
    }
}

pub struct App {
    args: Args,
    buff: String
}

impl App {
    pub fn new(args: Args) -> Self {
        let buff = String::with_capacity(1024);
        App { args, buff }
    }

    pub fn run(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        let input = load_input(&self.args.input, self.args.kind, self.args.metric)?;
        let params = RipsParams::default()
            .max_dim(self.args.max_dim)
            .thresh(self.args.thresh.unwrap_or(f64::INFINITY))
            .coeff(self.args.coeff);

        let res = rips(input, &params)?;

        self.show_stats(&res.diagram);

        if let Some(t) = self.args.at {
            self.show_betti(&res.diagram, t);
        }

        Ok(self.flush())
    }

    fn show_stats(&mut self, dgm: &PersistenceDiagram) {
        let cols = ["finite", "essential", "total", "entropy"];
        let str = table("H", 0..=self.args.max_dim, cols.iter(), |&d, &&c|
            match c {
                "finite"    => dgm.finite(d).count().to_string(),
                "essential" => dgm.essential(d).count().to_string(),
                "total"     => fil_value(dgm.total_persistence(d)),
                _           => fil_value(dgm.persistence_entropy(d)),
            }
        );
        self.out(&str);
    }

    fn show_betti(&mut self, dgm: &PersistenceDiagram, t: f64) {
        let str = table("H", 0..=self.args.max_dim, [""].iter(), |&d, _|
            dgm.betti_at(d, t).to_string()
        );
        self.out(&format!("betti at {}:", fil_value(t)));
        self.out(&str);
    }

    fn out(&mut self, str: &str) {
        self.buff.push_str(str);
        self.buff.push('\n');
    }

    fn flush(&mut self) -> String {
        let res = std::mem::take(&mut self.buff);
        res.trim().to_string()
    }
}
