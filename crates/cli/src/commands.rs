use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a query and print its descriptor as JSON
    Compile {
        #[command(flatten)]
        source: QuerySource,

        #[command(flatten)]
        options: OptionArgs,

        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,

        #[arg(
            long,
            help = "If specified, writes the descriptor to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Print the parsed expression tree as JSON
    Ast {
        #[command(flatten)]
        source: QuerySource,
    },
    /// Compile a query and report whether it is valid
    Check {
        #[command(flatten)]
        source: QuerySource,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct QuerySource {
    #[arg(short, long, help = "Query text")]
    pub query: Option<String>,

    #[arg(short, long, help = "File containing the query text")]
    pub file: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    #[arg(long, help = "JSON file with compile options")]
    pub options: Option<String>,

    #[arg(long, help = "Load environment variables from this .env file")]
    pub env_file: Option<String>,

    #[arg(long, help = "Reject a query that repeats a directive")]
    pub reject_duplicates: bool,

    #[arg(long, help = "Require limit and offset literals to be whole integers")]
    pub strict_integers: bool,
}
