use clap::{ArgAction, Args, Parser, Subcommand};

use esdemo_client::Fuzziness;

#[derive(Parser, Debug)]
#[command(name = "esdemo", version, about = "Walk through basic Elasticsearch client calls")]
pub struct Cli {
    /// Raise log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Target index; defaults to `demo.index` from the config
    #[arg(long, global = true)]
    pub index: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the cluster answers
    Ping,
    /// Index a demo user under a random id
    Index,
    /// Fetch a document by id
    Get {
        /// Document id; defaults to `demo.document_id`
        id: Option<String>,
    },
    /// Fuzzy match search
    Fuzzy(FuzzyArgs),
    /// Match search with highlighting and paging
    Highlight(HighlightArgs),
    /// Index the sample post the search demos look for
    Seed,
    /// Run every demo in order
    All,
}

#[derive(Args, Debug)]
pub struct FuzzyArgs {
    #[arg(long, default_value = "user")]
    pub field: String,
    #[arg(long, default_value = "kimchy")]
    pub text: String,
    /// AUTO, 0, 1 or 2
    #[arg(long, default_value = "AUTO")]
    pub fuzziness: Fuzziness,
    #[arg(long, default_value_t = 3)]
    pub prefix_length: u32,
    #[arg(long, default_value_t = 10)]
    pub max_expansions: u32,
}

#[derive(Args, Debug)]
pub struct HighlightArgs {
    #[arg(long, default_value = "user")]
    pub field: String,
    #[arg(long, default_value = "kimchy")]
    pub text: String,
    #[arg(long, default_value_t = 0)]
    pub from: usize,
    #[arg(long, default_value_t = 10)]
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_defaults() {
        let cli = Cli::try_parse_from(["esdemo", "fuzzy"]).unwrap();
        match cli.command {
            Commands::Fuzzy(args) => {
                assert_eq!(args.field, "user");
                assert_eq!(args.text, "kimchy");
                assert_eq!(args.fuzziness, Fuzziness::Auto);
                assert_eq!(args.prefix_length, 3);
                assert_eq!(args.max_expansions, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["esdemo", "get", "abc", "--index", "users", "-vv"]).unwrap();
        assert_eq!(cli.index.as_deref(), Some("users"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Get { id: Some(ref id) } if id == "abc"));
    }

    #[test]
    fn rejects_out_of_range_fuzziness() {
        assert!(Cli::try_parse_from(["esdemo", "fuzzy", "--fuzziness", "5"]).is_err());
    }

    #[test]
    fn highlight_paging_flags() {
        let cli = Cli::try_parse_from(["esdemo", "highlight", "--from", "20", "--size", "5"]).unwrap();
        match cli.command {
            Commands::Highlight(args) => {
                assert_eq!(args.from, 20);
                assert_eq!(args.size, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
