//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

use crate::config::ConfigOverrides;

/// Send an email via Amazon SES
#[derive(Parser, Debug)]
#[command(name = "postman")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Extra logging information; `send` lists every recipient
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Override the SES endpoint URL
    #[arg(long = "endpoint-url", global = true, env = "AWS_ENDPOINT_URL_SES")]
    pub endpoint_url: Option<String>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration overrides taken from the global options.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint: self.endpoint_url.clone(),
        }
    }
}

/// The six SES operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Send a raw message read from standard input
    Send {
        /// The address to send the message from, must be verified
        #[arg(short = 'f', value_name = "SENDER")]
        from: String,

        /// Email addresses to deliver the message to
        #[arg(value_name = "TO", required = true, num_args = 1..)]
        destinations: Vec<String>,
    },

    /// Request verification of sender addresses
    Verify {
        /// An email address to verify for sending from
        #[arg(required = true, num_args = 1..)]
        email: Vec<String>,
    },

    /// List verified sender addresses
    #[command(name = "list_verified")]
    ListVerified,

    /// Show the sending quota
    #[command(name = "show_quota")]
    ShowQuota,

    /// Show sending statistics for the last two weeks
    #[command(name = "show_stats")]
    ShowStats,

    /// Remove addresses from the verified list
    #[command(name = "delete_verified")]
    DeleteVerified {
        /// Verified email addresses to delete from the verification list
        #[arg(required = true, num_args = 1..)]
        email: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommand_names_use_underscores() {
        let names: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "send",
                "verify",
                "list_verified",
                "show_quota",
                "show_stats",
                "delete_verified"
            ]
        );
    }
}
