use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use graft_core::{GraftConfig, ResourceLocator};
use graft_namespace::{scan_documents, ExtensionLoader, ExtensionRegistry, Manifest};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct ResolvedNamespace<'a> {
    namespace: &'a str,
    extension: &'a str,
    schema: &'a str,
}

fn cli() -> Command {
    Command::new("graft")
        .version(graft_core::VERSION)
        .about("Namespace-extension discovery and component-graph translation")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .short('r')
                .global(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Search root (repeatable, replaces configured roots)"),
        )
        .arg(
            Arg::new("extra-documents")
                .long("extra-documents")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Include blueprint-ext.xml documents"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (RUST_LOG overrides)"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("locate").about("List discovered documents and manifests"))
        .subcommand(
            Command::new("scan")
                .about("Print the namespace inventory of the discovered documents")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the namespace lookup table built from the default extensions")
                .arg(
                    Arg::new("extension")
                        .long("extension")
                        .short('e')
                        .action(ArgAction::Append)
                        .help("Extension identifier to load instead of discovered manifests"),
                )
                .arg(json_arg()),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<GraftConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GraftConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GraftConfig::new(),
    };
    if let Some(roots) = matches.get_many::<PathBuf>("root") {
        config = config.with_search_roots(roots.cloned());
    }
    if matches.get_flag("extra-documents") {
        config = config.with_extra_documents(true);
    }
    Ok(config)
}

fn locate(config: &GraftConfig) -> Result<()> {
    let locator = ResourceLocator::from_config(config);
    let documents = locator.find(&config.effective_document_patterns())?;
    let manifests = locator.find(&config.manifest_patterns)?;

    println!("Documents:");
    for path in &documents {
        println!("  {}", path.display());
    }
    println!("Manifests:");
    for path in &manifests {
        println!("  {}", path.display());
    }
    Ok(())
}

fn scan(config: &GraftConfig, json: bool) -> Result<()> {
    let documents = ResourceLocator::from_config(config).documents(config)?;
    let inventory = scan_documents(&documents)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
    } else {
        println!("Namespaces ({}):", inventory.len());
        for namespace in inventory.iter() {
            println!("  {namespace}");
        }
    }
    Ok(())
}

fn resolve(config: &GraftConfig, extensions: Vec<String>, json: bool) -> Result<()> {
    let locator = ResourceLocator::from_config(config);
    let documents = locator.documents(config)?;
    let inventory = scan_documents(&documents)?;

    let registry = ExtensionRegistry::with_defaults()?;
    let manifests = if extensions.is_empty() {
        locator.manifests(config)?
    } else {
        vec![Manifest::parse_str("--extension", &extensions.join("\n"))?]
    };

    let handlers = ExtensionLoader::new(&registry)
        .with_conflict(config.namespace_conflict)
        .load(&manifests, &inventory)?;

    let rows: Vec<ResolvedNamespace<'_>> = handlers
        .iter()
        .map(|(namespace, binding)| ResolvedNamespace {
            namespace,
            extension: &binding.extension_id,
            schema: binding.schema.as_str(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("Namespace Lookup Table ({}):", rows.len());
        for row in &rows {
            println!("  {} [{}] {}", row.namespace, row.extension, row.schema);
        }
        let unresolved: Vec<&str> = inventory
            .iter()
            .filter(|ns| !handlers.contains(ns))
            .collect();
        if !unresolved.is_empty() {
            println!("Not handled by any extension:");
            for namespace in unresolved {
                println!("  {namespace}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("locate", _)) => locate(&config),
        Some(("scan", args)) => scan(&config, args.get_flag("json")),
        Some(("resolve", args)) => {
            let extensions = args
                .get_many::<String>("extension")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default();
            resolve(&config, extensions, args.get_flag("json"))
        }
        _ => Ok(()),
    }
}
