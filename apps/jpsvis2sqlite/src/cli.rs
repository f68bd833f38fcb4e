//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use jv_convert::{
    ConvertOptions, ConvertResult, FailurePolicy, FrameRate, OverwritePolicy, Resolution,
    TxtFormat, geometry_from_options,
};

/// Convert jpsvis trajectory files into visualizer SQLite databases
#[derive(Parser, Debug)]
#[command(name = "jpsvis2sqlite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input files: a glob relative to the working directory, `**` recurses
    pub file_pattern: String,

    /// Output file; only allowed when the pattern matches a single file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Walkable area as a WKT polygon
    #[arg(short, long, value_name = "WKT")]
    pub geometry: Option<String>,

    /// File whose first line is the walkable area as a WKT polygon
    #[arg(long, visible_alias = "gf", value_name = "PATH")]
    pub geometry_file: Option<PathBuf>,

    /// Tick rate of the frame numbers in the files (ticks per second); read
    /// from the file header or time column when omitted
    #[arg(long, visible_alias = "fps", value_name = "FPS")]
    pub frame_rate: Option<f64>,

    /// Column layout of the input files
    #[arg(long, value_enum, default_value_t = InputFormat::Jpsvis)]
    pub format: InputFormat,

    /// Fail instead of replacing existing output files
    #[arg(long)]
    pub no_overwrite: bool,

    /// Stop at the first file that fails to convert
    #[arg(long)]
    pub fail_fast: bool,

    /// Convert files concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Whitespace separated `id frame x y ...` with `#` header lines
    Jpsvis,
    /// Comma separated `id,frame,x,y`, optional column-name row
    Csv,
}

impl InputFormat {
    pub fn txt_format(self) -> TxtFormat {
        match self {
            InputFormat::Jpsvis => TxtFormat::JPSVIS,
            InputFormat::Csv => TxtFormat::CSV,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the overrides and build the batch settings.
    pub fn convert_options(&self) -> ConvertResult<ConvertOptions> {
        let geometry =
            geometry_from_options(self.geometry.as_deref(), self.geometry_file.as_deref())?;
        let frame_rate = Resolution::try_from_option(self.frame_rate, FrameRate::new)?;

        Ok(ConvertOptions {
            format: self.format.txt_format(),
            frame_rate,
            geometry,
            output: self.output.clone(),
            overwrite: if self.no_overwrite {
                OverwritePolicy::Fail
            } else {
                OverwritePolicy::Overwrite
            },
            failure_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::Continue
            },
            parallel: self.parallel,
        })
    }
}
