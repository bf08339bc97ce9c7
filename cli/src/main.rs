use clap::{Parser, ValueEnum};
use reckon::{
    CompilationOptions, DEFAULT_MAX_DEPTH, Error, ExecutionStrategy, compile_expression,
    render_error,
};
use std::io::BufRead;
use std::io::BufReader;

/// Reckon - evaluate integer arithmetic over named parameters
#[derive(Parser, Debug)]
#[command(name = "reckon")]
#[command(about = "Evaluate Reckon expressions", long_about = None)]
struct Args {
    /// Bind a parameter, e.g. `-p x=42` (repeatable; order defines positions)
    #[arg(short = 'p', long = "param", value_parser = parse_binding)]
    params: Vec<(String, i64)>,

    /// Execution strategy; `all` runs every strategy and checks they agree
    #[arg(long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,

    /// Print the parsed and optimized trees
    #[arg(long)]
    print_ast: bool,

    /// Print the bytecode disassembly
    #[arg(long)]
    print_bytecode: bool,

    /// Skip the optimizer
    #[arg(long)]
    no_optimize: bool,

    /// Maximum parenthesis nesting
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Expression to evaluate (if not provided, reads one per line from stdin)
    expression: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Tree,
    Optimized,
    Bytecode,
    All,
}

impl StrategyArg {
    fn strategies(self) -> &'static [ExecutionStrategy] {
        match self {
            StrategyArg::Tree => &[ExecutionStrategy::Tree],
            StrategyArg::Optimized => &[ExecutionStrategy::OptimizedTree],
            StrategyArg::Bytecode => &[ExecutionStrategy::Bytecode],
            StrategyArg::All => &ExecutionStrategy::ALL,
        }
    }
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
enum CliError {
    #[error("invalid parameter binding `{0}`")]
    #[diagnostic(code(reckon::cli::binding), help("use name=value, e.g. -p x=42"))]
    InvalidBinding(String),

    #[error("strategies disagree on `{source_text}`: {details}")]
    #[diagnostic(code(reckon::cli::mismatch))]
    Mismatch { source_text: String, details: String },

    #[error("{0} expression(s) failed")]
    #[diagnostic(code(reckon::cli::failed))]
    Failed(usize),

    #[error("failed to read standard input")]
    #[diagnostic(code(reckon::cli::io))]
    Io(#[from] std::io::Error),
}

fn parse_binding(raw: &str) -> Result<(String, i64), CliError> {
    let invalid = || CliError::InvalidBinding(raw.to_string());
    let (name, value) = raw.split_once('=').ok_or_else(invalid)?;
    let value = value.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((name.trim().to_string(), value))
}

/// Checks that every strategy produced the same outcome and returns it.
fn agreed_outcome(
    source: &str,
    mut outcomes: Vec<(ExecutionStrategy, Result<i64, Error>)>,
) -> Result<Result<i64, Error>, CliError> {
    let (first_strategy, first) = outcomes.remove(0);
    for (strategy, outcome) in &outcomes {
        let same = match (&first, outcome) {
            (Ok(a), Ok(b)) => a == b,
            (Err(a), Err(b)) => std::mem::discriminant(a) == std::mem::discriminant(b),
            _ => false,
        };
        if !same {
            return Err(CliError::Mismatch {
                source_text: source.to_string(),
                details: format!(
                    "{} gave {:?}, {} gave {:?}",
                    first_strategy.name(),
                    first,
                    strategy.name(),
                    outcome
                ),
            });
        }
    }
    Ok(first)
}

/// Evaluates one expression, printing its value or rendering its error.
/// Returns whether it succeeded.
fn interpret_input(input: &str, args: &Args) -> Result<bool, CliError> {
    let names: Vec<&str> = args.params.iter().map(|(name, _)| name.as_str()).collect();
    let values: Vec<i64> = args.params.iter().map(|(_, value)| *value).collect();
    let options = CompilationOptions {
        optimize: !args.no_optimize,
        max_depth: args.max_depth,
    };

    let expr = match compile_expression(input, &names, &options) {
        Ok(expr) => expr,
        Err(e) => {
            render_error(&e);
            return Ok(false);
        }
    };

    if args.print_ast {
        println!("=== AST ===");
        println!("{}", expr.ast_text());
        if options.optimize {
            println!("=== Optimized AST ===");
            println!("{}", expr.optimized_ast_text());
        }
        println!();
    }

    if args.print_bytecode {
        println!("=== Bytecode ===");
        println!("{}", expr.bytecode_text());
    }

    let outcomes = args
        .strategy
        .strategies()
        .iter()
        .map(|&strategy| {
            let outcome = expr.run(&values, strategy);
            tracing::debug!(strategy = strategy.name(), ?outcome, "Evaluated");
            (strategy, outcome)
        })
        .collect();

    match agreed_outcome(input, outcomes)? {
        Ok(value) => {
            println!("{}", value);
            Ok(true)
        }
        Err(e) => {
            render_error(&e);
            Ok(false)
        }
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control the log level; default to WARN
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Some(expr) = &args.expression {
        if !interpret_input(expr, &args)? {
            return Err(CliError::Failed(1).into());
        }
        return Ok(());
    }

    // Pipe/stdin mode: one expression per line
    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());
    let mut failed = 0;
    for line in reader.lines() {
        let line = line.map_err(CliError::from)?;
        if line.trim().is_empty() {
            continue;
        }
        if !interpret_input(&line, &args)? {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::Failed(failed).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("x=42").unwrap(), ("x".to_string(), 42));
        assert_eq!(parse_binding(" y = -7 ").unwrap(), ("y".to_string(), -7));
        assert!(matches!(
            parse_binding("x"),
            Err(CliError::InvalidBinding(raw)) if raw == "x"
        ));
        assert!(parse_binding("x=1.5").is_err());
        assert!(parse_binding("x=99999999999999999999").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "reckon",
            "-p",
            "x=1",
            "--param",
            "y=2",
            "--strategy",
            "bytecode",
            "x + y",
        ])
        .unwrap();
        assert_eq!(
            args.params,
            vec![("x".to_string(), 1), ("y".to_string(), 2)]
        );
        assert_eq!(args.strategy, StrategyArg::Bytecode);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(args.expression.as_deref(), Some("x + y"));
    }

    #[test]
    fn test_agreed_outcome() {
        let all_ok = ExecutionStrategy::ALL
            .iter()
            .map(|&s| (s, Ok(3)))
            .collect();
        assert_eq!(agreed_outcome("1 + 2", all_ok).unwrap(), Ok(3));

        let disagree = vec![
            (ExecutionStrategy::Tree, Ok(3)),
            (ExecutionStrategy::Bytecode, Ok(4)),
        ];
        assert!(matches!(
            agreed_outcome("x", disagree),
            Err(CliError::Mismatch { .. })
        ));

        let both_fail = vec![
            (ExecutionStrategy::Tree, Err(Error::Api("a".to_string()))),
            (ExecutionStrategy::Bytecode, Err(Error::Api("b".to_string()))),
        ];
        assert!(agreed_outcome("x", both_fail).unwrap().is_err());
    }
}
