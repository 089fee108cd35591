use log::info;
use clap::{Parser, Subcommand};

use super::cmd::{rips, stats};
use super::utils::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
#[clap(rename_all="lower")]
pub enum Cmd {
    Rips(rips::Args),
    Stats(stats::Args),
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        use log::LevelFilter::*;
        let level = match &self.command {
            Cmd::Rips(args)  => args.log,
            Cmd::Stats(args) => args.log,
        };
        match level {
            1 => Info,
            2 => Debug,
            3 => Trace,
            _ => Off,
        }
    }
}

pub struct App {
    pub args: CliArgs
}

impl App {
    pub fn new() -> Self {
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.init_logger()?;

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) -> Result<(), Box<dyn std::error::Error>> {
        let l = self.args.log_level();
        filt::util::log::init_simple_logger(l)?;
        Ok(())
    }

    fn dispatch(&self) -> Result<String, Box<dyn std::error::Error>> {
        guard_panic(||
            match &self.args.command {
                Cmd::Rips(args)  => rips::dispatch(args),
                Cmd::Stats(args) => stats::dispatch(args),
            }
        )
    }
}
