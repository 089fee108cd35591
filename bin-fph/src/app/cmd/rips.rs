use log::info;

use filt::Coeff;
use filt_dist::Metric;
use filt_rips::{rips, RipsParams, RipsResult};

use crate::app::err::*;
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

    #[arg(short = 'n', long)]
    pub n_perm: Option<usize>,

    #[arg(short, long, default_value = "unicode")]
    pub format: Format,

    #[arg(short, long)]
    pub output: Option<String>,

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
            n_perm: None,
            format: Format::default(),
            output: None,
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
        if let Some(t) = self.args.thresh {
            ensure!(t >= 0.0, "`thresh` must be non-negative.");
        }

        let input = load_input(&self.args.input, self.args.kind, self.args.metric)?;
        let params = RipsParams::default()
            .max_dim(self.args.max_dim)
            .thresh(self.args.thresh.unwrap_or(f64::INFINITY))
            .coeff(self.args.coeff)
            .n_perm(self.args.n_perm);

        let res = rips(input, &params)?;

        match self.args.format {
            Format::Unicode => self.show_unicode(&res),
            Format::Json    => self.out(&serde_json::to_string(&res)?)
        }

        if let Some(path) = &self.args.output {
            save_csv(path, &res.diagram)?;
            info!("saved: {path}");
        }

        Ok(self.flush())
    }

    fn show_unicode(&mut self, res: &RipsResult) {
        self.out(&res.diagram.to_string());

        if self.args.n_perm.is_some() {
            self.out(&format!("r_cover: {}", res.r_cover));
        }
        self.out(&format!("edges: {}", res.num_edges));
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
