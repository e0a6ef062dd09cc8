use clap::{error::ErrorKind, Parser};

/// Parse command-line arguments, exiting with status 1 and a usage message
/// on stderr when they are wrong. `--help` and `--version` exit normally.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}
