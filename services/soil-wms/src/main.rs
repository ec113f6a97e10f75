//! BGS soil WMS command line client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use soil_wms::params::{
    ConvertCoordinatesParams, DescribeLayerParams, GetCapabilitiesParams, GetFeatureInfoParams,
    GetMapParams, ListLayersParams,
};
use soil_wms::SoilTools;
use wms_client::{BoundingBox, ClientConfig, LayerList, WmsClient};
use wms_common::crs::{EPSG_27700, EPSG_4326};
use wms_protocol::getfeatureinfo::{DEFAULT_FEATURE_COUNT, DEFAULT_INFO_FORMAT};
use wms_protocol::getmap::{DEFAULT_FORMAT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use wms_protocol::DEFAULT_VERSION;

/// BGS soil data WMS client
#[derive(Parser, Debug)]
#[command(name = "soil-wms")]
#[command(about = "Query the BGS soil data WMS service", long_about = None)]
struct Cli {
    /// WMS endpoint
    #[arg(long, env = "BGS_WMS_URL")]
    base_url: Option<String>,

    /// Whole-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Number of worker threads
    #[arg(long, env = "SOIL_WMS_WORKER_THREADS")]
    worker_threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the service capabilities
    Capabilities {
        #[arg(long, default_value = DEFAULT_VERSION)]
        version: String,

        /// Bypass the cache
        #[arg(long)]
        force_refresh: bool,
    },

    /// List layers, optionally filtered by a search term
    Layers {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Describe a single layer
    Describe { name: String },

    /// Print a GetMap URL
    MapUrl {
        #[command(flatten)]
        map: MapArgs,

        #[arg(long, default_value = DEFAULT_FORMAT)]
        format: String,

        /// Request an opaque image
        #[arg(long)]
        opaque: bool,
    },

    /// Query feature information at a pixel
    FeatureInfo {
        #[command(flatten)]
        map: MapArgs,

        /// Pixel column
        #[arg(long, allow_negative_numbers = true)]
        x: i64,

        /// Pixel row
        #[arg(long, allow_negative_numbers = true)]
        y: i64,

        #[arg(long, default_value = DEFAULT_INFO_FORMAT)]
        info_format: String,

        #[arg(long, default_value_t = DEFAULT_FEATURE_COUNT)]
        feature_count: i64,
    },

    /// Convert a coordinate pair between CRSs
    Convert {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        #[arg(long, default_value = EPSG_4326)]
        from: String,

        #[arg(long, default_value = EPSG_27700)]
        to: String,
    },

    /// Print the soil data overview
    Summary,

    /// Invoke a tool by name with JSON arguments
    Call {
        tool: String,

        #[arg(default_value = "{}")]
        args: String,
    },

    /// Walk through the main operations against the live service
    Demo,
}

/// Map frame shared by GetMap and GetFeatureInfo.
#[derive(Args, Debug)]
struct MapArgs {
    /// Comma-separated layer names
    #[arg(long)]
    layers: String,

    /// minx,miny,maxx,maxy
    #[arg(long, allow_hyphen_values = true)]
    bbox: String,

    #[arg(long, default_value = EPSG_4326)]
    crs: String,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: i64,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: i64,

    #[arg(long, default_value = DEFAULT_VERSION)]
    version: String,
}

impl MapArgs {
    fn layer_list(&self) -> LayerList {
        let names: Vec<String> = self
            .layers
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if names.len() == 1 {
            LayerList::from(names[0].clone())
        } else {
            LayerList::from(names)
        }
    }

    fn bbox(&self) -> anyhow::Result<BoundingBox> {
        BoundingBox::from_wms_string(&self.bbox, self.crs.as_str())
            .with_context(|| format!("invalid --bbox '{}'", self.bbox))
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = cli.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run(cli))
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(&cli);

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }

    info!(base_url = %config.base_url, "Starting soil WMS client");

    let client = WmsClient::new(config).context("Failed to build WMS client")?;
    let tools = SoilTools::new(Arc::new(client));

    match cli.command {
        Commands::Capabilities {
            version,
            force_refresh,
        } => {
            let capabilities = tools
                .get_capabilities(GetCapabilitiesParams {
                    version,
                    force_refresh,
                })
                .await?;
            print_json(&*capabilities)
        }
        Commands::Layers { search } => {
            let layers = tools
                .list_layers(ListLayersParams {
                    search_query: search,
                })
                .await?;
            print_json(&layers)
        }
        Commands::Describe { name } => {
            let layer = tools
                .describe_layer(DescribeLayerParams { layer_name: name })
                .await?;
            print_json(&layer)
        }
        Commands::MapUrl {
            map,
            format,
            opaque,
        } => {
            let bbox = map.bbox()?;
            let url = tools.get_map(GetMapParams {
                layers: map.layer_list(),
                min_x: bbox.min_x,
                min_y: bbox.min_y,
                max_x: bbox.max_x,
                max_y: bbox.max_y,
                width: map.width,
                height: map.height,
                format,
                crs: map.crs,
                transparent: !opaque,
                version: map.version,
            });
            println!("{}", url);
            Ok(())
        }
        Commands::FeatureInfo {
            map,
            x,
            y,
            info_format,
            feature_count,
        } => {
            let bbox = map.bbox()?;
            let body = tools
                .get_feature_info(GetFeatureInfoParams {
                    layers: map.layer_list(),
                    min_x: bbox.min_x,
                    min_y: bbox.min_y,
                    max_x: bbox.max_x,
                    max_y: bbox.max_y,
                    x,
                    y,
                    width: map.width,
                    height: map.height,
                    info_format,
                    crs: map.crs,
                    feature_count,
                    version: map.version,
                })
                .await?;
            println!("{}", body);
            Ok(())
        }
        Commands::Convert { x, y, from, to } => print_json(&tools.convert_coordinates(
            ConvertCoordinatesParams {
                x,
                y,
                source_crs: from,
                target_crs: to,
            },
        )),
        Commands::Summary => print_json(&tools.get_soil_data_summary()),
        Commands::Call { tool, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("JSON_ARGS is not valid JSON")?;
            match tools.call(&tool, args).await {
                Ok(result) => print_json(&result),
                Err(e) => {
                    println!("{}", serde_json::to_string_pretty(&e)?);
                    std::process::exit(1);
                }
            }
        }
        Commands::Demo => demo(&tools).await,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn demo(tools: &SoilTools) -> anyhow::Result<()> {
    println!("BGS Soil Data WMS demo");
    println!("======================");

    let summary = tools.get_soil_data_summary();
    println!("\nService: {}", summary.service_url);
    println!("Soil data types:");
    for (name, description) in summary.soil_data_types {
        println!("  {}: {}", name, description);
    }

    let capabilities = tools
        .get_capabilities(GetCapabilitiesParams::default())
        .await?;
    println!("\nCapabilities");
    println!("  Title: {}", capabilities.title);
    println!("  Version: {}", capabilities.version);
    println!("  Layers: {}", capabilities.layers.len());
    println!("  Map formats: {}", capabilities.formats.join(", "));

    let layers = tools.list_layers(ListLayersParams::default()).await?;
    println!("\nFirst layers:");
    for layer in layers.iter().take(5) {
        println!("  {} ({})", layer.name, layer.title);
    }

    let depth = tools
        .list_layers(ListLayersParams {
            search_query: Some("depth".to_string()),
        })
        .await?;
    println!("\nLayers matching 'depth': {}", depth.len());
    for layer in &depth {
        println!("  {}", layer.name);
    }

    if let Some(first) = layers.first() {
        let layer = tools
            .describe_layer(DescribeLayerParams {
                layer_name: first.name.clone(),
            })
            .await?
            .ok_or_else(|| anyhow!("layer '{}' vanished from the catalog", first.name))?;
        println!("\nLayer {}", layer.name);
        println!("  Title: {}", layer.title);
        println!("  Queryable: {}", layer.queryable);
        println!("  CRS: {}", layer.crs_list.join(", "));
        if let Some(text) = &layer.abstract_text {
            println!("  Abstract: {}", text);
        }
    }

    let converted = tools.convert_coordinates(ConvertCoordinatesParams {
        x: -0.1276,
        y: 51.5074,
        source_crs: EPSG_4326.to_string(),
        target_crs: EPSG_27700.to_string(),
    });
    println!(
        "\nLondon ({}, {}) {} -> ({:.2}, {:.2}) {}",
        converted.source.x,
        converted.source.y,
        converted.source.crs,
        converted.target.x,
        converted.target.y,
        converted.target.crs
    );

    if let Some(first) = layers.first() {
        if !first.supports_crs(EPSG_4326) {
            warn!(
                layer = %first.name,
                crs_list = ?first.crs_list,
                "Layer does not advertise EPSG:4326"
            );
        }
        let url = tools.get_map(GetMapParams {
            layers: LayerList::from(first.name.clone()),
            min_x: -6.0,
            min_y: 50.0,
            max_x: 2.0,
            max_y: 58.0,
            width: 400,
            height: 300,
            format: DEFAULT_FORMAT.to_string(),
            crs: EPSG_4326.to_string(),
            transparent: true,
            version: DEFAULT_VERSION.to_string(),
        });
        println!("\nGetMap URL:\n  {}", url);
    }

    Ok(())
}
