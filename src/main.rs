//! exifkit - command-line front end for the EXIF library.
//!
//! Each subcommand validates its configuration, runs one library operation
//! and reports failures through the log.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exifkit::{
    config::{
        Cli, Command, InsertConfig, RemoveConfig, RewriteConfig, ShowConfig, ThumbnailConfig,
        TransplantConfig,
    },
    dump_with_order, insert_file, load, read_file, remove_file, tag_name, transplant_file,
    write_file, ExifData, ExifError, IfdKind, TagValue,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.into_command() {
        Command::Show(config) => run_show(config),
        Command::Insert(config) => run_insert(config),
        Command::Remove(config) => run_remove(config),
        Command::Transplant(config) => run_transplant(config),
        Command::Rewrite(config) => run_rewrite(config),
        Command::Thumbnail(config) => run_thumbnail(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "exifkit=debug" } else { "exifkit=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Failure of a subcommand: bad arguments or a library error.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Exif(#[from] ExifError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} has no embedded thumbnail")]
    NoThumbnail(String),
}

// =============================================================================
// Show Command
// =============================================================================

fn run_show(config: ShowConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    let exif = load(config.file.as_path())?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&show_json(&exif))?);
        return Ok(());
    }

    for kind in IfdKind::ALL {
        let ifd = exif.ifd(kind);
        if ifd.is_empty() {
            continue;
        }

        println!("[{}]", kind);
        for (&tag, value) in ifd {
            println!(
                "  0x{:04X}  {:<32}  {}",
                tag,
                tag_name(kind, tag).unwrap_or("?"),
                format_value(value)
            );
        }
    }

    if let Some(thumbnail) = &exif.thumbnail {
        println!("[thumbnail]");
        println!("  {} bytes", thumbnail.len());
    }

    Ok(())
}

/// JSON view keyed by directory name, then tag name (hex id if uncatalogued).
fn show_json(exif: &ExifData) -> serde_json::Value {
    let mut root = serde_json::Map::new();

    for kind in IfdKind::ALL {
        let mut tags = serde_json::Map::new();
        for (&tag, value) in exif.ifd(kind) {
            let key = tag_name(kind, tag)
                .map(str::to_string)
                .unwrap_or_else(|| format!("0x{:04X}", tag));
            tags.insert(key, serde_json::json!(value));
        }
        root.insert(kind.name().to_string(), serde_json::Value::Object(tags));
    }

    root.insert(
        "thumbnail".to_string(),
        serde_json::json!(exif.thumbnail.as_ref().map(Vec::len)),
    );

    serde_json::Value::Object(root)
}

fn format_value(value: &TagValue) -> String {
    match value {
        TagValue::Int(v) => v.to_string(),
        TagValue::Ints(vs) => format!("{:?}", vs),
        TagValue::Rational(num, den) => format!("{}/{}", num, den),
        TagValue::Rationals(vs) => {
            let parts: Vec<String> = vs.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
            format!("[{}]", parts.join(", "))
        }
        TagValue::Float(v) => v.to_string(),
        TagValue::Floats(vs) => format!("{:?}", vs),
        TagValue::Ascii(s) => format!("{:?}", s),
        TagValue::Undefined(bytes) if bytes.len() <= 16 => format!("{:02X?}", bytes),
        TagValue::Undefined(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

// =============================================================================
// Insert / Remove / Transplant Commands
// =============================================================================

fn run_insert(config: InsertConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    let blob = read_file(&config.exif).map_err(ExifError::from)?;
    insert_file(&blob, &config.image, config.output.as_deref())?;

    info!(
        "Inserted {} byte EXIF blob into {}",
        blob.len(),
        target_of(&config.image, config.output.as_deref())
    );
    Ok(())
}

fn run_remove(config: RemoveConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    remove_file(&config.image, config.output.as_deref())?;

    info!(
        "Removed EXIF from {}",
        target_of(&config.image, config.output.as_deref())
    );
    Ok(())
}

fn run_transplant(config: TransplantConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    transplant_file(
        config.source.as_path(),
        &config.image,
        config.output.as_deref(),
    )?;

    info!(
        "Copied EXIF from {} into {}",
        config.source.display(),
        target_of(&config.image, config.output.as_deref())
    );
    Ok(())
}

// =============================================================================
// Rewrite Command
// =============================================================================

fn run_rewrite(config: RewriteConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    let mut exif = load(config.image.as_path())?;
    if config.strip_thumbnail {
        exif.thumbnail = None;
        exif.first.clear();
    }

    let blob = dump_with_order(&exif, config.byte_order.into())?;
    insert_file(&blob, &config.image, config.output.as_deref())?;

    info!(
        "Rewrote {} byte EXIF blob ({:?}) into {}",
        blob.len(),
        config.byte_order,
        target_of(&config.image, config.output.as_deref())
    );
    Ok(())
}

// =============================================================================
// Thumbnail Command
// =============================================================================

fn run_thumbnail(config: ThumbnailConfig) -> Result<(), RunError> {
    config.validate().map_err(RunError::Config)?;

    let exif = load(config.image.as_path())?;
    let Some(thumbnail) = exif.thumbnail else {
        return Err(RunError::NoThumbnail(config.image.display().to_string()));
    };

    write_file(&config.output, &thumbnail).map_err(ExifError::from)?;

    info!(
        "Wrote {} byte thumbnail to {}",
        thumbnail.len(),
        config.output.display()
    );
    Ok(())
}

fn target_of(image: &std::path::Path, output: Option<&std::path::Path>) -> String {
    output.unwrap_or(image).display().to_string()
}
