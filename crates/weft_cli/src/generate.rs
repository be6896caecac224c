//! The `weft generate` subcommand.

use std::path::Path;

use weft_config::{load_config, resolve_job};
use weft_gen::InterconnectGenerator;
use weft_library::DirLibrary;
use weft_report::{Message, Reporter, Severity};

use crate::{Cli, GenerateArgs};

/// Runs one synthesis job. Returns the process exit code.
pub fn run(cli: &Cli, args: &GenerateArgs) -> i32 {
    let config = match load_config(Path::new(&args.config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    let job = match resolve_job(&config) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let library_root = Path::new(&args.library);
    let output_root = args
        .out
        .as_deref()
        .map(Path::new)
        .unwrap_or(library_root)
        .to_path_buf();

    let mut library = DirLibrary::open(library_root);
    let reporter = Reporter::new();
    let mut generator = InterconnectGenerator::new(&mut library, &reporter, &output_root);

    let result = generator.generate_from_config(&job);
    render_messages(&reporter.take_all(), cli.quiet);

    match result {
        Ok(vlnv) => {
            if reporter.has_errors() {
                eprintln!("error: synthesis of {vlnv} finished with errors");
                1
            } else {
                if !cli.quiet {
                    println!("synthesized {vlnv}");
                }
                0
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

/// Renders accumulated messages; info lines are dropped in quiet mode.
fn render_messages(messages: &[Message], quiet: bool) {
    for message in messages {
        match message.severity {
            Severity::Info => {
                if !quiet {
                    println!("{}", message.text);
                }
            }
            Severity::Warning => eprintln!("warning: {}", message.text),
            Severity::Error => eprintln!("error: {}", message.text),
        }
    }
}
