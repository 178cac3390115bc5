//! Command-line configuration for exifkit.
//!
//! This module provides the CLI surface:
//! - Subcommands and arguments via clap
//! - Environment variables with `EXIFKIT_` prefix
//! - Per-command validation before any file is touched
//!
//! # Environment Variables
//!
//! - `EXIFKIT_VERBOSE` - Enable debug logging (default: false)
//! - `EXIFKIT_BYTE_ORDER` - Byte order used by `rewrite` (default: big)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::format::tiff::ByteOrder;

// =============================================================================
// CLI Arguments
// =============================================================================

/// exifkit - Read, write and move EXIF metadata in JPEG and TIFF files.
#[derive(Parser, Debug, Clone)]
#[command(name = "exifkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false, env = "EXIFKIT_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print every tag of every directory.
    Show(ShowConfig),

    /// Insert a dumped EXIF blob into a JPEG.
    Insert(InsertConfig),

    /// Strip EXIF from a JPEG.
    Remove(RemoveConfig),

    /// Copy the EXIF segment of one JPEG into another.
    Transplant(TransplantConfig),

    /// Decode and re-encode the EXIF of a JPEG.
    Rewrite(RewriteConfig),

    /// Extract the embedded thumbnail.
    Thumbnail(ThumbnailConfig),
}

// =============================================================================
// Subcommand Configuration
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ShowConfig {
    /// JPEG, TIFF or dumped EXIF file.
    pub file: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl ShowConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("file", &self.file)
    }
}

#[derive(Args, Debug, Clone)]
pub struct InsertConfig {
    /// File holding an EXIF blob that starts with "Exif\0\0".
    pub exif: PathBuf,

    /// Target JPEG.
    pub image: PathBuf,

    /// Write here instead of modifying the image in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InsertConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("exif", &self.exif)?;
        require_path("image", &self.image)?;
        if self.exif == self.image {
            return Err("EXIF blob and image must be different files".to_string());
        }
        require_output(self.output.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct RemoveConfig {
    /// Target JPEG.
    pub image: PathBuf,

    /// Write here instead of modifying the image in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RemoveConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("image", &self.image)?;
        require_output(self.output.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct TransplantConfig {
    /// JPEG whose EXIF segment is copied.
    pub source: PathBuf,

    /// Target JPEG.
    pub image: PathBuf,

    /// Write here instead of modifying the image in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TransplantConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("source", &self.source)?;
        require_path("image", &self.image)?;
        require_output(self.output.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct RewriteConfig {
    /// Target JPEG.
    pub image: PathBuf,

    /// Write here instead of modifying the image in place.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Byte order of the re-encoded blob.
    #[arg(long, value_enum, default_value_t = ByteOrderArg::Big, env = "EXIFKIT_BYTE_ORDER")]
    pub byte_order: ByteOrderArg,

    /// Drop the thumbnail and the First IFD.
    #[arg(long, default_value_t = false)]
    pub strip_thumbnail: bool,
}

impl RewriteConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("image", &self.image)?;
        require_output(self.output.as_deref())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ThumbnailConfig {
    /// JPEG, TIFF or dumped EXIF file.
    pub image: PathBuf,

    /// Where to write the thumbnail bytes.
    #[arg(short, long)]
    pub output: PathBuf,
}

impl ThumbnailConfig {
    pub fn validate(&self) -> Result<(), String> {
        require_path("image", &self.image)?;
        if self.output.as_os_str().is_empty() {
            return Err("Thumbnail output path is required. Set --output".to_string());
        }
        Ok(())
    }
}

/// Byte order accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrderArg {
    /// Motorola order (MM)
    #[default]
    Big,
    /// Intel order (II)
    Little,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Big => ByteOrder::BigEndian,
            ByteOrderArg::Little => ByteOrder::LittleEndian,
        }
    }
}

fn require_path(name: &str, path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err(format!("{} path must not be empty", name));
    }
    Ok(())
}

fn require_output(output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) if path.as_os_str().is_empty() => {
            Err("--output must not be empty when given".to_string())
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Tests
// =============================================================================
