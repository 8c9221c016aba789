use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use spel_core::{
    accept, classify, find_method, suggest, AnalysisSession, Config, EvaluationClient,
    EvaluationResponse, InputKind, SessionState, SPEL_METHODS,
};
use std::path::PathBuf;
use std::process::ExitCode;

mod theme;
use theme::SyntaxTheme;

#[derive(Parser, Debug)]
#[command(name = "spel", about = "Analyze and evaluate SpEL accessor expressions")]
struct Cli {
    /// Configuration file (defaults to ./spel.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates an expression and lists the variables it references.
    Check { expression: String },
    /// Prints the highlight tokens of an expression.
    Tokens {
        expression: String,
        #[arg(long)]
        json: bool,
    },
    /// Prints the expression with terminal colors.
    Highlight {
        expression: String,
        /// "dark" or "light"; overrides the configured theme.
        #[arg(long)]
        theme: Option<String>,
    },
    /// Lists method completions at a cursor position.
    Suggest {
        expression: String,
        /// Cursor in characters; defaults to the end of the expression.
        #[arg(long)]
        cursor: Option<usize>,
        /// Applies the named completion and prints the result.
        #[arg(long)]
        accept: Option<String>,
    },
    /// Lists every known method.
    Methods,
    /// Sends the expression and variable values to the evaluation service.
    Evaluate {
        expression: String,
        /// Variable value as key=value; repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        values: Vec<String>,
        /// Variable to send as null; repeatable.
        #[arg(long = "null", value_name = "KEY")]
        nulls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    match cli.command {
        Commands::Check { expression } => Ok(check(&expression)),
        Commands::Tokens { expression, json } => {
            let tokens = classify(&expression);
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in tokens {
                    let kind = format!("{:?}", token.token_type);
                    println!("{:>4}..{:<4} {:<13} {:?}", token.start, token.end, kind, token.text);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Highlight { expression, theme } => {
            let theme = SyntaxTheme::by_name(theme.as_deref().unwrap_or(&config.editor.theme));
            let painted: Vec<String> = classify(&expression)
                .iter()
                .map(|token| theme.paint(token).to_string())
                .collect();
            println!("{}", painted.concat());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Suggest { expression, cursor, accept: chosen } => {
            let cursor = cursor.unwrap_or_else(|| expression.chars().count());
            match chosen {
                Some(name) => {
                    let method = find_method(&name)
                        .with_context(|| format!("unknown method '{}'", name))?;
                    let completion = accept(&expression, cursor, method);
                    println!("{}", completion.text);
                    println!("cursor: {}", completion.cursor);
                }
                None => {
                    for method in suggest(&expression, cursor)
                        .into_iter()
                        .take(config.editor.max_suggestions)
                    {
                        println!("{:<40} {}", method.signature(), method.description);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Methods => {
            for method in SPEL_METHODS {
                println!("{}", method.signature());
                println!("    {}", method.description);
                println!("    e.g. {}", method.example);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Evaluate { expression, values, nulls } => {
            evaluate(&config, &expression, &values, &nulls).await
        }
    }
}

fn check(expression: &str) -> ExitCode {
    let session = AnalysisSession::new().edit(expression);
    match session.diagnostic() {
        Some(diagnostic) => {
            println!("{}", expression);
            println!("{}^", " ".repeat(diagnostic.position));
            println!("error[{}]: {}", diagnostic.rule, diagnostic.message);
            ExitCode::FAILURE
        }
        None if session.keys().is_empty() => {
            println!("valid, no variables referenced");
            ExitCode::SUCCESS
        }
        None => {
            println!("valid, variables: {}", session.keys().join(", "));
            ExitCode::SUCCESS
        }
    }
}

async fn evaluate(
    config: &Config,
    expression: &str,
    values: &[String],
    nulls: &[String],
) -> Result<ExitCode> {
    let mut session = AnalysisSession::new().edit(expression);
    if session.state() == SessionState::Invalid {
        return Ok(check(expression));
    }

    for assignment in values {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("expected KEY=VALUE, got '{}'", assignment);
        };
        session.set_value(key, value)?;
    }
    for key in nulls {
        session.set_input_kind(key, InputKind::Null)?;
    }

    let request = session.evaluation_request()?;
    let client = EvaluationClient::from_config(&config.evaluator)?;
    info!("evaluating against {}", client.url());

    let response = match client.evaluate(&request).await {
        Ok(response) => response,
        Err(err) => EvaluationResponse::connection_failure(&err),
    };

    match response.error {
        Some(error) => {
            eprintln!("Evaluation Error: {}", error);
            Ok(ExitCode::FAILURE)
        }
        None => {
            println!("{}", response.result);
            Ok(ExitCode::SUCCESS)
        }
    }
}
