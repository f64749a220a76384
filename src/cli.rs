use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skywash",
    version,
    about = "Animated weather backdrop for the terminal"
)]
pub struct Cli {
    /// Initial weather icon code, e.g. 01d, 10n (default: 01d)
    pub icon: Option<String>,

    /// Start with the dark scheme
    #[arg(long)]
    pub dark: bool,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable the thunderstorm screen flash
    #[arg(long)]
    pub no_flash: bool,

    /// Seed the particle randomness for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Skip loading and saving settings on disk
    #[arg(long)]
    pub no_settings: bool,
}

impl Cli {
    #[must_use]
    pub fn default_icon(&self) -> String {
        self.icon.clone().unwrap_or_else(|| "01d".to_string())
    }

    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }
}
