use kiln::config::{ColorMode, Config, Verbosity};

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorMode>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorMode>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorMode::Never) => false,
            Some(ColorMode::Always) => true,
            Some(ColorMode::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        // The definition can ask for verbose output; the flag can only raise it.
        let config_verbose = match config.output.verbosity {
            Verbosity::Verbose => 1,
            Verbosity::Quiet | Verbosity::Normal => 0,
        };

        Self {
            json,
            verbose: verbose.max(config_verbose),
            caps,
            color,
            unicode,
        }
    }
}
