//! Trestle demo CLI
//!
//! Inspects the sample shop domain through the metamodel: list the
//! registered classes, describe one class's facets, run the validators,
//! or walk a managed instance.

mod domain;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trestle_ident::LogicalTypeName;
use trestle_metamodel::{
    ManagedObject, MetaModelConfig, MetaModelContext, ObjectSpecification, Strictness,
};

#[derive(Parser)]
#[command(name = "trestle")]
#[command(about = "Trestle metamodel demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding layout and column-order files
    #[arg(long, default_value = ".", global = true)]
    resources: PathBuf,

    /// Load configuration from a TOML file instead of flags
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered domain classes
    List,

    /// Describe one class: its facets, members and their facets
    Describe {
        /// Logical type name, e.g. "shop.Customer"
        type_name: String,
    },

    /// Build the whole metamodel and run the validators
    Validate {
        /// Report advisory defects (e.g. dangling layout ids) too
        #[arg(long)]
        strict: bool,
        /// Emit the failure report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk a sample customer instance through the metamodel
    Demo,

    /// Show the resolved table column order for a class
    Columns {
        /// Logical type name, e.g. "shop.Customer"
        type_name: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = build_context(&cli)?;

    match cli.command {
        Commands::List => list(&ctx),
        Commands::Describe { type_name } => describe(&ctx, &type_name),
        Commands::Validate { strict: _, json } => validate(&ctx, json),
        Commands::Demo => demo(&ctx),
        Commands::Columns { type_name } => columns(&ctx, &type_name),
    }
}

fn build_context(cli: &Cli) -> anyhow::Result<MetaModelContext> {
    let mut config = match &cli.config {
        Some(path) => MetaModelConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MetaModelConfig {
            resources_root: cli.resources.clone(),
            ..MetaModelConfig::default()
        },
    };
    if let Commands::Validate { strict: true, .. } = cli.command {
        config.strictness = Strictness::Strict;
    }
    let registry = domain::build_registry().context("registering the sample domain")?;
    Ok(MetaModelContext::builder(registry).config(config).build())
}

fn parse_type_name(raw: &str) -> anyhow::Result<LogicalTypeName> {
    LogicalTypeName::parse(raw).with_context(|| format!("'{raw}' is not a logical type name"))
}

fn list(ctx: &MetaModelContext) -> anyhow::Result<()> {
    for name in ctx.loader().registry().registered_names() {
        let spec = ctx.load_spec(name)?;
        println!(
            "{name}  [{:?}]  {} properties, {} collections, {} actions",
            spec.bean_sort(),
            spec.properties().len(),
            spec.collections().len(),
            spec.actions().len(),
        );
    }
    Ok(())
}

fn print_holder(indent: &str, holder: &trestle_metamodel::FacetHolder) {
    for entry in holder.facets() {
        println!("{indent}{:?} @ {:?}", entry.facet.kind(), entry.precedence);
    }
}

fn describe(ctx: &MetaModelContext, type_name: &str) -> anyhow::Result<()> {
    let spec: std::sync::Arc<ObjectSpecification> = ctx.load_spec(&parse_type_name(type_name)?)?;
    println!("{} [{:?}]", spec.logical_type_name(), spec.bean_sort());
    print_holder("  ", spec.holder());

    for property in spec.properties() {
        println!("property {}", property.id());
        print_holder("  ", property.holder());
    }
    for collection in spec.collections() {
        println!("collection {}", collection.id());
        print_holder("  ", collection.holder());
    }
    for action in spec.actions() {
        println!("action {}", action.id());
        print_holder("  ", action.holder());
        for param in action.parameters() {
            println!("  param {} [{}]", param.name(), param.index());
            print_holder("    ", param.holder());
        }
    }
    Ok(())
}

fn validate(ctx: &MetaModelContext, json: bool) -> anyhow::Result<()> {
    let failures = ctx.create_metamodel()?;
    if failures.is_empty() {
        println!("metamodel is valid ({} classes)", ctx.loader().cached_count());
        return Ok(());
    }
    if json {
        println!("{}", failures.to_json()?);
    } else {
        for failure in failures.iter() {
            println!("{}: {}", failure.identifier, failure.message);
        }
    }
    bail!("{} validation failure(s)", failures.len());
}

fn demo(ctx: &MetaModelContext) -> anyhow::Result<()> {
    ctx.create_metamodel()?;
    let spec = ctx.load_spec(&parse_type_name("shop.Customer")?)?;
    let managed = ManagedObject::of_object(spec, domain::sample_customer());

    println!("title: {}", managed.title()?);
    for id in ["firstName", "lastName"] {
        if let Some(value) = managed.get_property(id)? {
            println!("{id}: {value:?}");
        }
    }
    println!("orders: {} element(s)", managed.collection_size("orders")?);
    let placed = managed.invoke_action(
        "placeOrder",
        &["SKU-7".into(), trestle_applib::Value::Int(2)],
    )?;
    println!("placeOrder -> {placed:?}");
    Ok(())
}

fn columns(ctx: &MetaModelContext, type_name: &str) -> anyhow::Result<()> {
    let spec = ctx.load_spec(&parse_type_name(type_name)?)?;
    let ordered = ctx
        .column_order()
        .order_standalone(spec.logical_type_name().as_str(), &spec.property_ids());
    for id in ordered {
        println!("{id}");
    }
    Ok(())
}
