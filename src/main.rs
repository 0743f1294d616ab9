use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use varconf::error::{ConfigError, UnclassifiedErrorKind};

#[derive(Debug, Parser)]
#[clap(name = "varconf", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: Option<VarconfCommand>,
}

#[derive(Debug, Subcommand)]
pub enum VarconfCommand {
    /// Evaluate a program and print its bindings as JSON (the default).
    Run {
        /// Source file; standard input when absent or `-`.
        path: Option<PathBuf>,
        #[clap(long = "diagnostics", value_enum, default_value = "basic")]
        diagnostics: DiagnosticFormat,
    },
    /// Print the token stream.
    Tokenize {
        path: Option<PathBuf>,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the parsed declarations.
    Parse {
        path: Option<PathBuf>,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: DeclarationFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DiagnosticFormat {
    Debug,
    Basic,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DeclarationFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

fn main() -> ExitCode {
    match varconf_main() {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report}");
            ExitCode::from(4)
        }
    }
}

fn varconf_main() -> Result<ExitCode> {
    color_eyre::install()?;
    varconf::logging::init_tracing();

    let args = CLArgs::parse();
    let routine = args.routine.unwrap_or(VarconfCommand::Run {
        path: None,
        diagnostics: DiagnosticFormat::Basic,
    });
    match routine {
        VarconfCommand::Run { path, diagnostics } => run(path.as_deref(), &diagnostics),
        VarconfCommand::Tokenize { path, format } => tokenize(path.as_deref(), &format),
        VarconfCommand::Parse { path, format } => parse(path.as_deref(), &format),
    }
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p == Path::new("-"))
}

fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if !is_stdin(path) => p.to_string_lossy().into_owned(),
        _ => "<stdin>".into(),
    }
}

fn read_source(path: Option<&Path>) -> Result<String, ConfigError> {
    let input_error = |message: String| {
        ConfigError::Unclassified(UnclassifiedErrorKind::Input(message).into())
    };
    let bytes = match path {
        Some(p) if !is_stdin(path) => std::fs::read(p),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes).map(|_| bytes)
        }
    }
    .map_err(|e| input_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| input_error(e.to_string()))
}

fn report(error: &ConfigError, source: &str, name: &str, format: &DiagnosticFormat) {
    use varconf::error::formatter::{
        BasicFormatter, DebugFormatter, DiagnosticFormatter, PrettyFormatter,
    };

    let formatter: Box<dyn DiagnosticFormatter + '_> = match format {
        DiagnosticFormat::Debug => Box::new(DebugFormatter),
        DiagnosticFormat::Basic => Box::new(BasicFormatter),
        DiagnosticFormat::Pretty => Box::new(PrettyFormatter::new(source, name)),
    };
    eprintln!("{}", formatter.format(error).trim_end());
}

fn run(path: Option<&Path>, diagnostics: &DiagnosticFormat) -> Result<ExitCode> {
    let name = display_name(path);
    let source = match read_source(path) {
        Ok(source) => source,
        Err(error) => {
            report(&error, "", &name, diagnostics);
            return Ok(ExitCode::from(error.exit_code()));
        }
    };

    match varconf::run(&source) {
        Ok(document) => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            report(&error, &source, &name, diagnostics);
            Ok(ExitCode::from(error.exit_code()))
        }
    }
}

fn tokenize(path: Option<&Path>, format: &TokenFormat) -> Result<ExitCode> {
    use varconf::lexer::formatter::{BasicFormatter, DebugFormatter, ToFormatter, TokenFormatter};
    use varconf::lexer::{Lexer, TokenKind};

    let source = match read_source(path) {
        Ok(source) => source,
        Err(error) => {
            report(&error, "", &display_name(path), &DiagnosticFormat::Basic);
            return Ok(ExitCode::from(error.exit_code()));
        }
    };

    let mut scanner = Lexer::new(&source);
    let formatter: Box<dyn TokenFormatter + '_> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&scanner)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&scanner)),
    };
    let mut stdout = std::io::stdout().lock();
    let mut succeeded = true;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                writeln!(stdout, "{}", formatter.format(&token))?;
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                writeln!(stdout, "{}", formatter.format_lexical_error(&error))?;
                succeeded = false;
            }
        }
    }

    Ok(match succeeded {
        true => ExitCode::SUCCESS,
        false => ExitCode::from(2),
    })
}

fn parse(path: Option<&Path>, format: &DeclarationFormat) -> Result<ExitCode> {
    use varconf::parser::formatter::{DebugFormatter, DeclarationFormatter, SExpressionFormatter};

    let name = display_name(path);
    let source = match read_source(path) {
        Ok(source) => source,
        Err(error) => {
            report(&error, "", &name, &DiagnosticFormat::Basic);
            return Ok(ExitCode::from(error.exit_code()));
        }
    };

    let formatter: Box<dyn DeclarationFormatter> = match format {
        DeclarationFormat::Debug => Box::new(DebugFormatter),
        DeclarationFormat::SExpr => Box::new(SExpressionFormatter),
    };
    match varconf::parse_program(&source) {
        Ok(program) => {
            if !program.is_empty() {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", formatter.format_program(&program))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let error = ConfigError::from(error);
            report(&error, &source, &name, &DiagnosticFormat::Basic);
            Ok(ExitCode::from(error.exit_code()))
        }
    }
}
