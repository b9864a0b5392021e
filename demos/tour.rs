//! A tour of the parser surface without ever exiting the process: every
//! outcome is handled as a value.

use argot::{ActionType, ArgumentParser, Nargs, ParseOutcome};

fn main() -> anyhow::Result<()> {
    let mut parser = ArgumentParser::new("tour")
        .description("A command touring the capabilities of argot.")
        .epilog("Try `tour --help`, `tour --version` or a bad --mode value.");

    parser
        .add_argument(["filename"], ActionType::Store)?
        .help("Input filename to process");
    parser
        .add_argument(["-l", "--limit"], ActionType::Store)?
        .default("10")
        .metavar("N")
        .help("Limit the number of things by N (default: 10)");
    parser
        .add_argument(["-i", "--include"], ActionType::Store)?
        .nargs(Nargs::OneOrMore)
        .metavar("PATH")
        .help("Extra paths to include, at least one");
    parser
        .add_argument(["--level"], ActionType::Store)?
        .nargs(Nargs::Optional)
        .constant("full")
        .default("none")
        .help("Detail level; bare --level means full");
    parser
        .add_argument(["-m", "--mode"], ActionType::Store)?
        .default("auto")
        .choices(["auto", "manual", "debug"])
        .help("Processing mode");
    parser
        .add_argument(["--version"], ActionType::Version)?
        .constant("tour 0.1.0")
        .help("Show version information");

    let outcome = match parser.parse_env() {
        Ok(outcome) => outcome,
        Err(error) => {
            eprintln!("{}", parser.format_error(&error));
            std::process::exit(error.exit_code());
        }
    };

    let args = match outcome {
        ParseOutcome::Parsed(args) => args,
        ParseOutcome::HelpRequested(text) | ParseOutcome::VersionRequested(text) => {
            println!("{text}");
            return Ok(());
        }
    };

    println!("filename = {}", args.get::<String>("filename")?);
    println!("limit = {}", args.get::<u32>("limit")?);
    println!("level = {}", args.get::<String>("level")?);
    println!("mode = {}", args.get::<String>("mode")?);

    if args.contains("include") {
        println!("include = {}", args.get::<String>("include")?);
    }

    Ok(())
}
