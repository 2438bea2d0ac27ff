//! Autowire CLI
//!
//! Entry point for the `autowire` command-line tool.

use autowire_map::config::DEFAULT_CONFIG_FILE;
use autowire_map::{
    AutowireConfig, AutowiredFactory, ConfigResolver, KnownClasses, ResolvedFactoryMap,
    ScannerProvider,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autowire")]
#[command(about = "Resolve autowiring configuration for a namespace", version)]
struct Cli {
    /// Log resolution details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration of every class in a namespace
    Resolve {
        /// Namespace rooted at the directory (e.g. "App")
        #[arg(long, short = 'n')]
        namespace: String,

        /// Directory the namespace is rooted at
        #[arg(long, short = 'd')]
        dir: PathBuf,

        /// Path to config file (default: autowire.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Extension of class files
        #[arg(long, default_value = "php")]
        extension: String,

        /// Restrict loadable classes to these names (repeatable)
        #[arg(long = "class")]
        classes: Vec<String>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Show which patterns apply to a class and the fragment they fold into
    Explain {
        /// Path to config file (default: autowire.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// Fully qualified class name
        class: String,
    },

    /// Verify the config file
    Verify {
        /// Path to config file (default: autowire.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Resolve {
            namespace,
            dir,
            config,
            extension,
            classes,
            human,
        } => {
            run_resolve(&namespace, dir, config, &extension, classes, human);
        }
        Commands::Explain {
            config,
            human,
            class,
        } => {
            run_explain(config, &class, human);
        }
        Commands::Verify { config } => {
            run_verify(config);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_resolve(
    namespace: &str,
    dir: PathBuf,
    config_path: Option<PathBuf>,
    extension: &str,
    classes: Vec<String>,
    human: bool,
) {
    let (config, resolver) = load_resolver(config_path);
    let resolver = resolver.with_provider(ScannerProvider::with_extension(extension));
    let overrides = Value::Object(config.overrides);

    let result = if classes.is_empty() {
        resolver.resolve(namespace, &dir, &overrides)
    } else {
        let known: KnownClasses = classes.into_iter().collect();
        resolver.with_loader(known).resolve(namespace, &dir, &overrides)
    };

    let factories = match result {
        Ok(factories) => factories,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    if human {
        print_factories(&factories);
    } else {
        print_json(&factories);
    }
}

fn print_factories(factories: &ResolvedFactoryMap<AutowiredFactory>) {
    if factories.is_empty() {
        println!("No classes found.");
        return;
    }

    println!("Resolved classes ({} total):\n", factories.len());

    for (class, factory) in factories {
        println!("  {}", class);
        if factory.config.is_empty() {
            println!("    (no configuration)");
        }
        for (key, value) in &factory.config {
            println!("    {}: {}", key, value);
        }
        println!();
    }
}

#[derive(Serialize)]
struct Explanation<'a> {
    class: &'a str,
    patterns: Vec<&'a str>,
    config: Value,
}

fn run_explain(config_path: Option<PathBuf>, class: &str, human: bool) {
    let (config, resolver) = load_resolver(config_path);

    let table = match resolver.table(&Value::Object(config.overrides)) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    let explanation = Explanation {
        class,
        patterns: table.matching(class).map(|entry| entry.pattern()).collect(),
        config: Value::Object(table.fold(class)),
    };

    if !human {
        print_json(&explanation);
        return;
    }

    println!("Class: {}", class);
    if explanation.patterns.is_empty() {
        println!("  No pattern matches.");
        return;
    }

    println!("  Matching patterns (least specific first):");
    for pattern in &explanation.patterns {
        println!("    {}", pattern);
    }
    println!("  Resolved configuration:");
    println!("    {}", explanation.config);
}

fn run_verify(config_path: Option<PathBuf>) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let (config, resolver) = load_resolver(Some(path.clone()));

    let table = match resolver.table(&Value::Object(config.overrides.clone())) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    match &config.source {
        Some(source) => {
            println!("Configuration valid: {}", path.display());
            println!();
            println!("  Digest: {}", source.digest);
        }
        None => {
            println!("No configuration file at {}, using empty tables", path.display());
            println!();
        }
    }
    println!("  Default patterns: {}", config.defaults.len());
    println!("  Override patterns: {}", config.overrides.len());
    println!("  Effective patterns: {}", table.len());
}

fn load_resolver(config_path: Option<PathBuf>) -> (AutowireConfig, ConfigResolver) {
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let config = match AutowireConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    match ConfigResolver::new(&Value::Object(config.defaults.clone())) {
        Ok(resolver) => (config, resolver),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
