use crate::{commands::OptionArgs, env::EnvManager, error::CliError};
use dirq_compiler::{CompileOptions, DuplicatePolicy, IntegerParsing};
use std::fs;
use tracing::debug;

pub const REJECT_DUPLICATES_VAR: &str = "DIRQ_REJECT_DUPLICATES";
pub const STRICT_INTEGERS_VAR: &str = "DIRQ_STRICT_INTEGERS";

/// Resolves compile options. Later layers win: defaults, options file,
/// environment, command-line flags.
pub fn resolve_options(args: &OptionArgs) -> Result<CompileOptions, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &args.env_file {
        env.load_from_file(path)?;
    }

    resolve_with_env(args, &env)
}

fn resolve_with_env(args: &OptionArgs, env: &EnvManager) -> Result<CompileOptions, CliError> {
    let mut options = match &args.options {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => CompileOptions::default(),
    };

    if let Some(reject) = env.flag(REJECT_DUPLICATES_VAR)? {
        options.duplicates = if reject {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Overwrite
        };
    }
    if let Some(strict) = env.flag(STRICT_INTEGERS_VAR)? {
        options.integers = if strict {
            IntegerParsing::Strict
        } else {
            IntegerParsing::Lenient
        };
    }

    if args.reject_duplicates {
        options.duplicates = DuplicatePolicy::Reject;
    }
    if args.strict_integers {
        options.integers = IntegerParsing::Strict;
    }

    debug!(?options, "Resolved compile options");
    Ok(options)
}
