use argot::{ActionType, ArgumentParser};

fn main() -> anyhow::Result<()> {
    let mut parser = ArgumentParser::new("simple")
        .description("A simple example demonstrating argot functionality");

    parser
        .add_argument(["filename"], ActionType::Store)?
        .help("Input filename to process");
    parser
        .add_argument(["-v", "--verbose"], ActionType::StoreTrue)?
        .help("Enable verbose output");
    parser
        .add_argument(["-o", "--output"], ActionType::Store)?
        .default("output.txt")
        .metavar("FILE")
        .help("Output filename");
    parser
        .add_argument(["-n", "--count"], ActionType::Store)?
        .default("1")
        .metavar("N")
        .help("Number of iterations");
    parser
        .add_argument(["-m", "--mode"], ActionType::Store)?
        .default("auto")
        .metavar("MODE")
        .choices(["auto", "manual", "debug"])
        .help("Processing mode");
    parser
        .add_argument(["--version"], ActionType::Version)?
        .constant("simple 1.0")
        .help("Show version information");

    let args = parser.parse_or_exit(std::env::args().skip(1));

    println!("Parsed arguments:");
    println!("  filename: {}", args.get::<String>("filename")?);
    println!("  verbose: {}", args.get::<bool>("verbose")?);
    println!("  output: {}", args.get::<String>("output")?);
    println!("  count: {}", args.get::<i32>("count")?);
    println!("  mode: {}", args.get::<String>("mode")?);

    if args.get::<bool>("verbose")? {
        println!();
        println!("Verbose mode enabled!");
        println!("Processing file: {}", args.get::<String>("filename")?);
        println!("Output will be written to: {}", args.get::<String>("output")?);
        println!("Running {} iterations", args.get::<i32>("count")?);
        println!("Mode: {}", args.get::<String>("mode")?);
    }

    Ok(())
}
