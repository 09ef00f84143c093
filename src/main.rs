// ==============================================================================
// CLI for the drafter Wrapper
// ==============================================================================
//
// `drafter-rs [--bin PATH] [OPTIONS] [INPUT]`
//
// Forwards drafter's own options to the `drafter` binary through the library
// builder and prints whatever drafter prints on stdout. Mostly useful for
// checking what command line the builder produces (`--print-command`) and for
// exercising a drafter installation from scripts.

use std::io::{self, Read as _, Write as _};
use std::path::PathBuf;

use drafter::{Drafter, DrafterOption};
use lexopt::prelude::*;
use miette::IntoDiagnostic;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const USAGE: &str = "\
Usage: drafter-rs [OPTIONS] [INPUT]

Run drafter on an API Blueprint document and print its output.

Arguments:
  [INPUT]                 API Blueprint file, or `-` for stdin

Options:
      --bin <PATH>        drafter executable [env: DRAFTER_BIN] [default: drafter]
  -o, --output <PATH>     have drafter write the result to PATH
  -f, --format <FORMAT>   AST serialization: json or yaml
  -s, --sourcemap <PATH>  have drafter write a source map to PATH
  -u, --use-line-num      line/column numbers in source maps
  -l, --validate          validate the input only
  -v, --version           print drafter's version
      --print-command     print the command line instead of running it
  -h, --help              print this help
";

// ==============================================================================
// Argument Parsing
// ==============================================================================

struct Cli {
    drafter: Drafter,
    print_command: bool,
}

fn parse_args() -> miette::Result<Option<Cli>> {
    let mut parser = lexopt::Parser::from_env();
    let mut drafter = Drafter::new();
    let mut print_command = false;

    while let Some(arg) = parser.next().into_diagnostic()? {
        let option = match arg {
            Short('h') | Long("help") => return Ok(None),
            Long("bin") => {
                let bin: PathBuf = parser.value().into_diagnostic()?.into();
                drafter.set_binary(bin);
                continue;
            }
            Long("print-command") => {
                print_command = true;
                continue;
            }
            Value(input) => {
                if drafter.get_input().is_some() {
                    miette::bail!("unexpected extra input argument {input:?}");
                }
                drafter.input(input.string().into_diagnostic()?);
                continue;
            }
            Short('o') => DrafterOption::Output,
            Short('f') => DrafterOption::Format,
            Short('s') => DrafterOption::Sourcemap,
            Short('u') => DrafterOption::UseLineNum,
            Short('l') => DrafterOption::Validate,
            Short('v') => DrafterOption::Version,
            Long(name) => name.parse::<DrafterOption>()?,
            Short(_) => return Err(arg.unexpected()).into_diagnostic(),
        };

        if option.takes_value() {
            let value = parser.value().into_diagnostic()?.string().into_diagnostic()?;
            drafter.set_option(option, value);
        } else {
            drafter.set_flag(option);
        }
    }

    Ok(Some(Cli {
        drafter,
        print_command,
    }))
}

// ==============================================================================
// Entry Point
// ==============================================================================

fn main() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().build())
    }))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let Some(cli) = parse_args()? else {
        print!("{USAGE}");
        return Ok(());
    };

    if cli.print_command {
        return write_stdout(&format!("{}\n", cli.drafter.render().join(" ")));
    }

    // The child gets no stdin of its own; `-` means forwarding ours.
    let output = if cli.drafter.get_input() == Some("-") {
        let mut source = Vec::new();
        io::stdin().read_to_end(&mut source).into_diagnostic()?;
        let mut invocation = cli.drafter.build();
        invocation.stdin(source);
        cli.drafter.run_invocation(&invocation)?
    } else {
        cli.drafter.run()?
    };
    write_stdout(&output)
}

/// Write to stdout as-is, treating a closed pipe (`drafter-rs ... | head`) as
/// success.
fn write_stdout(content: &str) -> miette::Result<()> {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(content.as_bytes()).and_then(|()| stdout.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.into_diagnostic(),
    }
}
