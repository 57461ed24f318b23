//! A command line interface to the exact min-max routing solver.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use u_makespan::io::{load_instance, IdentifierResolver, RouteReport};
use u_makespan::search::{MinMaxSolver, SolverConfig};
use u_makespan::Result;

const INPUT_ARG_NAME: &str = "INPUT";
const OUTPUT_ARG_NAME: &str = "out-result";
const CONFIG_ARG_NAME: &str = "config";
const TIME_LIMIT_ARG_NAME: &str = "time-limit";
const NO_PRUNING_ARG_NAME: &str = "no-pruning";
const PARALLEL_ARG_NAME: &str = "parallel";

fn get_app() -> Command {
    Command::new("u-makespan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves small min-max vehicle routing instances to optimality")
        .arg(
            Arg::new(INPUT_ARG_NAME)
                .help("Instance file in JSON format")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(OUTPUT_ARG_NAME)
                .help("Writes the routes to the given file instead of stdout")
                .short('o')
                .long(OUTPUT_ARG_NAME)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Solver configuration in JSON format")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(TIME_LIMIT_ARG_NAME)
                .help("Stops the search after the given number of seconds")
                .short('t')
                .long(TIME_LIMIT_ARG_NAME)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new(NO_PRUNING_ARG_NAME)
                .help("Disables the start-leg pruning guard")
                .long(NO_PRUNING_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(PARALLEL_ARG_NAME)
                .help("Spreads the search over all available cores")
                .long(PARALLEL_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

fn load_config(matches: &ArgMatches) -> Result<SolverConfig> {
    let mut config = match matches.get_one::<PathBuf>(CONFIG_ARG_NAME) {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => SolverConfig::default(),
    };

    if let Some(&secs) = matches.get_one::<f64>(TIME_LIMIT_ARG_NAME) {
        match Duration::try_from_secs_f64(secs) {
            Ok(limit) => config = config.with_time_limit(limit),
            Err(_) => tracing::warn!(secs, "ignoring invalid time limit"),
        }
    }
    if matches.get_flag(NO_PRUNING_ARG_NAME) {
        config = config.with_pruning(false);
    }
    if matches.get_flag(PARALLEL_ARG_NAME) {
        config = config.with_parallel(true);
    }

    Ok(config)
}

fn run_solve(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let input = matches
        .get_one::<PathBuf>(INPUT_ARG_NAME)
        .expect("input is a required argument");

    let instance = load_instance(input)?;
    tracing::info!(
        path = %input.display(),
        vehicles = instance.num_vehicles(),
        jobs = instance.num_jobs(),
        "instance loaded"
    );

    let outcome = MinMaxSolver::new(config).solve(&instance)?;
    tracing::info!("{}", outcome.statistics());

    let Some(solution) = outcome.solution() else {
        eprintln!("search stopped before any complete solution was found");
        process::exit(2);
    };

    let resolver = IdentifierResolver::new(&instance);
    let report = RouteReport::new(solution, outcome.status(), &resolver)?;

    match matches.get_one::<PathBuf>(OUTPUT_ARG_NAME) {
        Some(path) => report.write_file(path),
        None => report.write_to(BufWriter::new(io::stdout().lock())),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_makespan=info")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = get_app().get_matches();

    if let Err(err) = run_solve(&matches) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_is_well_formed() {
        get_app().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = get_app()
            .try_get_matches_from([
                "u-makespan",
                "instance.json",
                "--no-pruning",
                "--parallel",
                "-t",
                "2.5",
            ])
            .expect("valid arguments");
        let config = load_config(&matches).expect("no config file");
        assert!(!config.pruning());
        assert!(config.parallel());
        assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_defaults_without_flags() {
        let matches = get_app()
            .try_get_matches_from(["u-makespan", "instance.json"])
            .expect("valid arguments");
        assert_eq!(load_config(&matches).expect("defaults"), SolverConfig::default());
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(get_app().try_get_matches_from(["u-makespan"]).is_err());
    }
}
