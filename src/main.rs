use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cryptctl::{InitConfig, Initializer, Provider};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Command line options for cryptctl
#[derive(Parser, Debug)]
#[command(name = "cryptctl", author, version, about, long_about = None)]
struct Cli {
    /// Enables verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Init initializes the encrypted-secrets CLI
    Init(InitArgs),
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Provider to use
    #[arg(
        short = 'p',
        long = "provider",
        value_parser = ["k8s", "aws-kms", "aws-kms-envelope"]
    )]
    provider: String,

    /// Namespace to use (required for k8s)
    #[arg(short = 'n', long = "namespace", default_value = "")]
    namespace: String,

    /// KMS key alias to use (required for aws-kms-envelope)
    #[arg(short = 'k', long = "kmsalias", default_value = "")]
    kms_alias: String,

    /// DynamoDB table to use (required for aws-kms-envelope)
    #[arg(short = 'd', long = "dynamodb-table", default_value = "")]
    dynamodb_table: String,

    /// Run in debug mode using LocalStack instead of AWS
    #[arg(short = 'i', long = "debug")]
    debug: bool,

    /// Deadline in seconds for each AWS call made while validating
    #[arg(
        long = "timeout",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

impl InitArgs {
    fn to_config(&self) -> InitConfig {
        InitConfig::new(self.provider.as_str())
            .with_namespace(self.namespace.as_str())
            .with_kms_key_alias(self.kms_alias.as_str())
            .with_dynamodb_table(self.dynamodb_table.as_str())
            .with_debug(self.debug)
    }
}

/// Initialize logging based on verbosity; RUST_LOG takes precedence
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "cryptctl=debug,info"
    } else {
        "cryptctl=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_init(args: &InitArgs) -> Result<()> {
    let provider = Initializer::new()
        .with_timeout(Duration::from_secs(args.timeout))
        .initialize(args.to_config())
        .await?;

    match &provider {
        Provider::K8s(k8s) => {
            println!("k8s provider initialized (namespace {})", k8s.namespace());
        }
        Provider::AwsKms(kms) => {
            println!("aws-kms provider initialized ({} endpoint)", kms.endpoint());
        }
        Provider::AwsKmsEnvelope(envelope) => {
            println!(
                "aws-kms-envelope provider initialized (table {}, alias {}, {} endpoint)",
                envelope.table_name(),
                envelope.kms_key_alias(),
                envelope.endpoint()
            );
        }
    }
    tracing::debug!(provider = %provider.variant(), "initialization complete");

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match &cli.command {
        Command::Init(args) => run_init(args).await,
    }
}
