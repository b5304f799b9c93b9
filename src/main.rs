use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::tty::IsTty;
use itertools::Itertools;
use std::{io::stdin, path::PathBuf};

use worded::{
    app::App,
    app_dirs::AppDirs,
    config::{time_seed, Config, ConfigStore, FileConfigStore, RunConfig},
    convert::convert_file,
    results::{record_if_completed, Summary},
    runtime::{self, CrosstermEventSource},
    terminal::{install_interrupt_flag, TerminalGuard},
    word_bank::{BuiltinList, Dataset, WordBank},
};

/// minimal terminal typing test with word-level diffing and live wpm
#[derive(Parser, Debug, Clone)]
#[clap(version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// seed for word sampling [default: current unix time]
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// number of words to type
    #[clap(short = 'w', long = "words")]
    word_count: Option<usize>,

    /// ticks (frames) per second
    #[clap(short = 'f', long)]
    tick_rate: Option<u32>,

    /// words file, one word per line
    #[clap(short = 'd', long)]
    dataset: Option<PathBuf>,

    /// builtin word list, used when no dataset file is given
    #[clap(short = 'l', long, value_enum)]
    language: Option<BuiltinList>,

    /// append the result of a completed run to this csv file
    #[clap(long)]
    csv: Option<PathBuf>,

    /// append results to the default results file when no --csv is given
    #[clap(long)]
    save: bool,

    /// words of this length or longer are dropped from the dataset
    #[clap(long)]
    max_word_len: Option<usize>,

    /// print the sampled words and exit
    #[clap(short = 'p', long)]
    print_only: bool,

    /// config file to read defaults from
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// convert a monkeytype language json file into a words file
    Convert {
        input: PathBuf,

        #[clap(short = 'o', long, default_value = "words.txt")]
        output: PathBuf,
    },
}

impl Cli {
    /// Layers the command line over the stored config.
    fn run_config(&self, cfg: &Config) -> RunConfig {
        let mut run = RunConfig::from_config(cfg, self.seed.unwrap_or_else(time_seed));

        if let Some(n) = self.word_count {
            run.word_count = n;
        }
        if let Some(rate) = self.tick_rate {
            run.tick_rate = rate;
        }
        if let Some(max) = self.max_word_len {
            run.word_max = max;
        }

        match (&self.dataset, self.language) {
            (Some(path), _) => run.dataset = Dataset::File(path.clone()),
            (None, Some(list)) => run.dataset = Dataset::Builtin(list),
            (None, None) => {}
        }

        if let Some(path) = &self.csv {
            run.results_csv = Some(path.clone());
        } else if self.save && run.results_csv.is_none() {
            run.results_csv = AppDirs::results_path();
        }

        run
    }

    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(Command::Convert { input, output }) = &cli.command {
        let conv = convert_file(input, output)
            .with_context(|| format!("failed to convert '{}'", input.display()))?;
        println!("Converting {}...", conv.name);
        println!("Wrote {} words to '{}'", conv.words, output.display());
        println!("Max word length: {}", conv.max_len);
        return Ok(());
    }

    let store = cli.store();
    log::debug!("config file: {}", store.path().display());
    let run = cli.run_config(&store.load());
    run.validate().context("invalid configuration")?;
    log::debug!("run config: {run:?}");

    let bank = WordBank::load(&run.dataset, run.word_max)
        .with_context(|| format!("failed to load dataset '{}'", run.dataset))?;

    if cli.print_only {
        println!("{}", bank.sample(run.word_count, run.seed).iter().join(" "));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let interrupted = install_interrupt_flag().context("failed to install signal handler")?;
    let results_csv = run.results_csv.clone();
    let mut app = App::new(bank, run)?;

    let reason = {
        let mut guard = TerminalGuard::new().context("failed to set up the terminal")?;
        runtime::run(
            guard.terminal_mut(),
            &mut app,
            &mut CrosstermEventSource,
            &interrupted,
        )?
    };

    let record = app.record(chrono::Utc::now().timestamp());
    println!("{}", Summary { record: &record, reason });

    record_if_completed(reason, results_csv.as_deref(), &record)
        .context("failed to write results")?;

    Ok(())
}
