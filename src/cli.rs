// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eb")]
#[command(about = "Deploy and manage applications on the hosting service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (includes every API attempt)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// Region to talk to (overrides eb.yml and EB_REGION)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Service endpoint URL (overrides eb.yml and EB_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new eb.yml configuration file
    Init {
        /// Application name
        #[arg(short, long)]
        application: Option<String>,

        /// Overwrite an existing eb.yml
        #[arg(short, long)]
        force: bool,
    },

    /// Invoke a raw API operation and print its result
    Call {
        /// Service name, e.g. elasticbeanstalk
        service: String,

        /// Operation name, e.g. DescribeApplications
        operation: String,

        /// Operation parameter as KEY=VALUE (VALUE may be JSON)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// All parameters as one JSON object
        #[arg(long = "params", value_name = "JSON", conflicts_with = "params")]
        params_json: Option<String>,
    },

    /// List applications
    List,

    /// Show environment status
    Status {
        /// Application to show (defaults to the one in eb.yml)
        #[arg(short, long)]
        application: Option<String>,
    },
}
