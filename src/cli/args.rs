//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Vampire lineage trees: creators, offspring, seniority and closest common ancestors
#[derive(Parser, Debug)]
#[command(name = "bloodline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every lineage as a tree
    Tree,

    /// Show the creator of a vampire
    Creator {
        /// Vampire name
        name: String,
    },

    /// List the direct offspring of a vampire
    Offspring {
        /// Vampire name
        name: String,
    },

    /// Number of vampires between a vampire and its original
    Depth {
        /// Vampire name
        name: String,
    },

    /// Check whether FIRST is more senior than SECOND
    Senior {
        /// Vampire expected to be closer to the original
        first: String,
        /// Vampire to compare against
        second: String,
    },

    /// Closest common ancestor of two vampires
    Ancestor {
        /// First vampire name
        first: String,
        /// Second vampire name
        second: String,
    },

    /// Count all descendants of a vampire
    Descendants {
        /// Vampire name
        name: String,
    },

    /// Search a vampire by name
    Find {
        /// Name to search for
        name: String,
        /// Only search below this vampire
        #[arg(short, long)]
        from: Option<String>,
    },

    /// List vampires below (and including) NAME converted after a year
    After {
        /// Vampire name
        name: String,
        /// Threshold year (default: configured millennial year)
        #[arg(short, long, allow_negative_numbers = true)]
        year: Option<i32>,
    },

    /// Show the creator chain from the original down to a vampire
    Path {
        /// Vampire name
        name: String,
    },

    /// Show original, height and leaves of the subtree below a vampire
    Stats {
        /// Vampire name
        name: String,
    },

    /// Show status
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_after_with_year() {
        let cli = Cli::try_parse_from(["bloodline", "-dd", "after", "Original", "--year", "1500"])
            .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::After { name, year }) => {
                assert_eq!(name, "Original");
                assert_eq!(year, Some(1500));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_ancestor_takes_two_names() {
        let cli = Cli::try_parse_from(["bloodline", "ancestor", "Sarah", "Andrew"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Ancestor { first, second }) if first == "Sarah" && second == "Andrew"
        ));
        assert!(Cli::try_parse_from(["bloodline", "ancestor", "Sarah"]).is_err());
    }

    #[test]
    fn test_ancestor_help_describes_arguments() {
        let mut cmd = Cli::command();
        let ancestor = cmd.find_subcommand_mut("ancestor").unwrap();
        let helps: Vec<String> = ancestor
            .get_positionals()
            .map(|arg| arg.get_help().map(|h| h.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(helps, vec!["First vampire name", "Second vampire name"]);
    }
}
