use std::process::ExitCode;

use alloy_chains::NamedChain;
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use avusd_dispatch::providers::{AlloyReceiptSource, TokioClock};
use avusd_dispatch::{
    executor_lz_receive_option, AvUsdNetwork, BridgeOrchestrator, CcipAdapter, ConfigError,
    ConfirmationConfig, DestinationId, DispatchError, DispatchIntent, DispatchResult,
    LayerZeroAdapter, Recipient, TransportKind, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_SECS, PRIMARY_GAS_LIMIT,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Dispatch avUSD to another chain through the AvUSDBridging contract.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quote the fee, send the transfer with that fee attached and wait for the receipt
    Dispatch(DispatchArgs),

    /// Print LayerZero type-3 executor options as hex
    LzOptions {
        /// Gas for lzReceive on the destination chain
        #[arg(long, default_value_t = PRIMARY_GAS_LIMIT)]
        gas: u128,

        /// msg.value for lzReceive on the destination chain, in wei
        #[arg(long, default_value_t = 0)]
        value: u128,
    },
}

#[derive(Args, Debug)]
struct DispatchArgs {
    /// Source network the bridge is called on (eg, arbitrum-sepolia)
    #[arg(long, default_value = "arbitrum-sepolia")]
    network: NamedChain,

    /// RPC URL; defaults to <NETWORK>_RPC_URL, then the network's public endpoint
    #[arg(long)]
    rpc_url: Option<Url>,

    /// AvUSDBridging address; defaults to the network's deployment
    #[arg(long)]
    bridge: Option<Address>,

    /// Messaging protocol: primary (layerzero) or secondary (ccip)
    #[arg(long, default_value = "secondary")]
    transport: TransportKind,

    /// Destination network, resolved to the transport's own identifier
    #[arg(long, required_unless_present = "destination_id")]
    destination_chain: Option<NamedChain>,

    /// Raw destination identifier (LayerZero eid or CCIP chain selector)
    #[arg(long, conflicts_with = "destination_chain")]
    destination_id: Option<u64>,

    /// Recipient address on the destination chain
    #[arg(long)]
    recipient: Recipient,

    /// Amount in base units (18 decimals)
    #[arg(long)]
    amount: U256,

    /// Route through the bridge's alternate path
    #[arg(long)]
    alternate_path: bool,

    /// Seconds to wait for the receipt
    #[arg(long, default_value_t = DEFAULT_CONFIRMATION_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Seconds between receipt lookups
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval_secs: u64,

    /// Print the dispatch result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "avusd_dispatch=debug"
    } else {
        "avusd_dispatch=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let outcome = match cli.command {
        Command::Dispatch(args) => dispatch_command(args).await,
        Command::LzOptions { gas, value } => {
            println!("{}", executor_lz_receive_option(gas, value));
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch_command(args: DispatchArgs) -> Result<(), CliError> {
    let private_key =
        std::env::var("PRIVATE_KEY").map_err(|_| ConfigError::MissingEnv("PRIVATE_KEY"))?;
    let signer: PrivateKeySigner = private_key.trim().parse().map_err(ConfigError::from)?;

    let rpc_url = match args.rpc_url {
        Some(url) => url,
        None => args.network.rpc_url()?,
    };
    let bridge = match args.bridge {
        Some(address) => address,
        None => args.network.bridge_address()?,
    };
    let destination_id = match (args.destination_id, args.destination_chain) {
        (Some(id), _) => DestinationId::new(id),
        (None, Some(chain)) => chain.destination_id(args.transport)?,
        (None, None) => {
            return Err(ConfigError::Invalid(
                "either --destination-chain or --destination-id is required".to_string(),
            )
            .into())
        }
    };

    info!(
        network = %args.network,
        rpc_url = %rpc_url,
        bridge = %bridge,
        sender = %signer.address(),
        event = "cli_configured"
    );

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url);

    let orchestrator = BridgeOrchestrator::builder()
        .primary(
            LayerZeroAdapter::builder()
                .provider(provider.clone())
                .bridge_address(bridge)
                .build(),
        )
        .secondary(
            CcipAdapter::builder()
                .provider(provider.clone())
                .bridge_address(bridge)
                .build(),
        )
        .receipt_source(AlloyReceiptSource::new(provider))
        .clock(TokioClock::new())
        .confirmation(
            ConfirmationConfig::default()
                .with_timeout_secs(args.timeout_secs)
                .with_poll_interval_secs(args.poll_interval_secs),
        )
        .build();

    let intent = DispatchIntent::builder()
        .destination_id(destination_id)
        .recipient(args.recipient)
        .amount(args.amount)
        .use_alternate_path(args.alternate_path)
        .build()?;

    let result = orchestrator.dispatch(&intent, args.transport).await?;
    report(&result, args.json)?;

    if !result.receipt.is_success() {
        return Err(CliError::Reverted(result.receipt.tx_hash));
    }
    Ok(())
}

fn report(result: &DispatchResult, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("fee: {}", result.quote.amount());
        println!("Done: {}", result.receipt.tx_hash);
    }
    Ok(())
}
