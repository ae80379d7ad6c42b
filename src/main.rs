mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use futures::TryStreamExt;
use hcloud::entities::Action;
use hcloud::resource::{merge_fields, HasActions, Mutable};
use hcloud::{Client, Entity, Resource, ResourceApi};
use serde_json::{json, Map, Value};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command line client for the Hetzner Cloud API
#[derive(Parser, Debug)]
#[command(name = "hcloud", version, about, long_about = None)]
struct Args {
    /// API token (falls back to HCLOUD_TOKEN, then the config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every resource of a kind, across all pages
    List {
        kind: ResourceKind,
        /// Filter by exact name
        #[arg(long)]
        name: Option<String>,
        /// Filter by label selector, e.g. `env=prod`
        #[arg(short, long)]
        selector: Option<String>,
        /// Sort expression, e.g. `created:desc`
        #[arg(long)]
        sort: Option<String>,
        /// Page size
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show one resource
    Get { kind: ResourceKind, id: u64 },
    /// Delete one resource
    Delete { kind: ResourceKind, id: u64 },
    /// Rename one resource
    Rename {
        kind: ResourceKind,
        id: u64,
        name: String,
    },
    /// List the actions performed on one resource
    Actions { kind: ResourceKind, id: u64 },
    /// Store defaults in the config file
    Configure {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        per_page: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceKind {
    Actions,
    Certificates,
    Datacenters,
    Firewalls,
    FloatingIps,
    Images,
    Isos,
    LoadBalancers,
    LoadBalancerTypes,
    Locations,
    Networks,
    PlacementGroups,
    Pricing,
    Servers,
    ServerTypes,
    SshKeys,
    Volumes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Route tracing output to the log file; nothing is logged at `off`
fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(max_level) = level.as_level() else {
        return Ok(None);
    };

    let log_path = Config::log_path();
    if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(writer.with_max_level(max_level))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(log_file = %log_path.display(), "hcloud {} logging at {:?}", env!("CARGO_PKG_VERSION"), level);
    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();

    let output = match args.command {
        Command::Configure {
            token,
            endpoint,
            per_page,
        } => {
            config.token = token.or(config.token);
            config.endpoint = endpoint.or(config.endpoint);
            config.per_page = per_page.or(config.per_page);
            config.save()?;
            tracing::info!("Saved config to {:?}", Config::config_path());
            return Ok(());
        }
        Command::List {
            kind,
            name,
            selector,
            sort,
            per_page,
        } => {
            let client = connect(&config, &args.token, &args.endpoint)?;
            let mut params = Map::new();
            params.insert("name".to_string(), json!(name));
            params.insert("label_selector".to_string(), json!(selector));
            params.insert("sort".to_string(), json!(sort));
            params.insert(
                "per_page".to_string(),
                json!(config.effective_per_page(per_page)),
            );
            list(&client, kind, params).await?
        }
        Command::Get { kind, id } => {
            let client = connect(&config, &args.token, &args.endpoint)?;
            get(&client, kind, id).await?
        }
        Command::Delete { kind, id } => {
            let client = connect(&config, &args.token, &args.endpoint)?;
            delete(&client, kind, id).await?
        }
        Command::Rename { kind, id, name } => {
            let client = connect(&config, &args.token, &args.endpoint)?;
            rename(&client, kind, id, &name).await?
        }
        Command::Actions { kind, id } => {
            let client = connect(&config, &args.token, &args.endpoint)?;
            actions(&client, kind, id).await?
        }
    };

    print(&output, args.output)
}

fn connect(config: &Config, token: &Option<String>, endpoint: &Option<String>) -> Result<Client> {
    let mut builder = Client::builder().endpoint(config.effective_endpoint(endpoint.as_deref()));
    if let Some(token) = config.effective_token(token.as_deref()) {
        builder = builder.token(token);
    }
    builder.build().context("Failed to create API client")
}

fn print(value: &Value, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

/// Expand to a match over every kind, binding the kind's typed API to `$api`
macro_rules! for_kind {
    ($kind:expr, $client:expr, |$api:ident| $body:expr, [$($variant:ident => $method:ident),* $(,)?]) => {
        match $kind {
            $(ResourceKind::$variant => {
                let $api = $client.$method();
                $body
            })*
            #[allow(unreachable_patterns)]
            other => bail!("{:?} does not support this command", other),
        }
    };
}

async fn list(client: &Client, kind: ResourceKind, params: Map<String, Value>) -> Result<Value> {
    for_kind!(kind, client, |api| list_all(api, params).await, [
        Actions => actions,
        Certificates => certificates,
        Datacenters => datacenters,
        Firewalls => firewalls,
        FloatingIps => floating_ips,
        Images => images,
        Isos => isos,
        LoadBalancers => load_balancers,
        LoadBalancerTypes => load_balancer_types,
        Locations => locations,
        Networks => networks,
        PlacementGroups => placement_groups,
        Pricing => pricing,
        Servers => servers,
        ServerTypes => server_types,
        SshKeys => ssh_keys,
        Volumes => volumes,
    ])
}

async fn get(client: &Client, kind: ResourceKind, id: u64) -> Result<Value> {
    for_kind!(kind, client, |api| show(api.fetch(id).await?), [
        Actions => actions,
        Certificates => certificates,
        Datacenters => datacenters,
        Firewalls => firewalls,
        FloatingIps => floating_ips,
        Images => images,
        Isos => isos,
        LoadBalancers => load_balancers,
        LoadBalancerTypes => load_balancer_types,
        Locations => locations,
        Networks => networks,
        PlacementGroups => placement_groups,
        Servers => servers,
        ServerTypes => server_types,
        SshKeys => ssh_keys,
        Volumes => volumes,
    ])
}

async fn delete(client: &Client, kind: ResourceKind, id: u64) -> Result<Value> {
    for_kind!(kind, client, |api| delete_one(api, id).await, [
        Certificates => certificates,
        Firewalls => firewalls,
        FloatingIps => floating_ips,
        Images => images,
        LoadBalancers => load_balancers,
        Networks => networks,
        PlacementGroups => placement_groups,
        Servers => servers,
        SshKeys => ssh_keys,
        Volumes => volumes,
    ])
}

async fn rename(client: &Client, kind: ResourceKind, id: u64, name: &str) -> Result<Value> {
    for_kind!(kind, client, |api| rename_one(api, id, name).await, [
        Certificates => certificates,
        Firewalls => firewalls,
        FloatingIps => floating_ips,
        Images => images,
        LoadBalancers => load_balancers,
        Networks => networks,
        PlacementGroups => placement_groups,
        Servers => servers,
        SshKeys => ssh_keys,
        Volumes => volumes,
    ])
}

async fn actions(client: &Client, kind: ResourceKind, id: u64) -> Result<Value> {
    for_kind!(kind, client, |api| actions_of(api, id).await, [
        Certificates => certificates,
        Firewalls => firewalls,
        FloatingIps => floating_ips,
        Images => images,
        LoadBalancers => load_balancers,
        Networks => networks,
        Servers => servers,
        Volumes => volumes,
    ])
}

fn show<T: Entity>(resource: Resource<T>) -> Result<Value> {
    Ok(serde_json::to_value(resource.fields())?)
}

async fn list_all<T: Entity>(api: ResourceApi<T>, params: Map<String, Value>) -> Result<Value> {
    let resources = api.list(params).collect_all().await?;
    tracing::info!("Listed {} {}", resources.len(), T::COLLECTION);

    let fields = resources
        .iter()
        .map(|r| serde_json::to_value(r.fields()))
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(Value::Array(fields))
}

async fn delete_one<T: Mutable>(api: ResourceApi<T>, id: u64) -> Result<Value> {
    let mut resource = api.get(id);
    let action = resource.delete().await?;
    match action {
        Some(action) => show(action),
        None => Ok(json!({ "deleted": id })),
    }
}

/// Rename through the update endpoint, sending only `name`
async fn rename_one<T: Mutable>(api: ResourceApi<T>, id: u64, name: &str) -> Result<Value> {
    let mut resource = api.get(id);
    resource.fetched().await?;

    let renamed = merge_fields(resource.fields(), json!({ "name": name }))?;
    *resource.fields_mut() = renamed;
    resource.update_fields(&["name"]).await?;

    show(resource)
}

async fn actions_of<T: HasActions>(api: ResourceApi<T>, id: u64) -> Result<Value> {
    let mut resource = api.get(id);
    let stream = resource.actions(Map::new()).await?.into_stream();
    let actions: Vec<Resource<Action>> = stream.try_collect().await?;

    let fields = actions
        .iter()
        .map(|a| serde_json::to_value(a.fields()))
        .collect::<serde_json::Result<Vec<_>>>()?;
    Ok(Value::Array(fields))
}
