use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use core::time::Duration;
use snowmint::{CompactId, DEFAULT_EPOCH, ExtendedId, Radix, SnowflakeId};

/// Command-line configuration for the `snowmint` binary.
///
/// Global options can also be supplied through environment variables or a
/// `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowmint",
    version,
    about = "Generate Snowflake IDs and decode their embedded timestamps"
)]
pub struct CliArgs {
    /// Node ID embedded in every generated identifier.
    ///
    /// Values wider than the node field of the chosen width are truncated
    /// to its low bits (10 bits for 64-bit IDs, 48 bits for 128-bit IDs).
    ///
    /// Environment variable: `NODE_ID`
    #[arg(long, env = "NODE_ID", default_value_t = 0, global = true)]
    pub node_id: u64,

    /// Custom epoch in Unix milliseconds. Timestamps count from here.
    ///
    /// Must match the epoch used by whoever produced an ID when extracting
    /// its time.
    ///
    /// Environment variable: `EPOCH_MS`
    #[arg(long, env = "EPOCH_MS", default_value_t = DEFAULT_EPOCH.as_millis() as u64, global = true)]
    pub epoch_ms: u64,

    /// Time source for generation.
    ///
    /// Environment variable: `CLOCK`
    #[arg(long, env = "CLOCK", value_enum, default_value_t = ClockKind::System, global = true)]
    pub clock: ClockKind,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print freshly generated identifiers, one per line.
    Generate {
        /// Number of identifiers to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Identifier width in bits.
        #[arg(short, long, value_enum, default_value_t = Width::Bits64)]
        width: Width,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Decimal)]
        format: Format,

        /// Drop leading zeros from hex and base36 output. Unpadded strings
        /// no longer sort like the identifiers they encode.
        #[arg(long, default_value_t = false)]
        unpadded: bool,
    },

    /// Print the instant embedded in an identifier.
    Extract {
        /// The identifier, in the given format.
        id: String,

        /// Identifier width in bits.
        #[arg(short, long, value_enum, default_value_t = Width::Bits64)]
        width: Width,

        /// Input format.
        #[arg(short, long, value_enum, default_value_t = Format::Decimal)]
        format: Format,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Wall clock, read on every call.
    System,
    /// Wall-clock anchor advanced by a background ticker. Never goes
    /// backwards.
    Monotonic,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// `CompactId`: 41-bit timestamp, 10-bit node, 13-bit sequence.
    #[value(name = "64")]
    Bits64,
    /// `ExtendedId`: 64-bit timestamp, 48-bit node, 16-bit sequence.
    #[value(name = "128")]
    Bits128,
}

impl Width {
    pub fn max_node_id(self) -> u64 {
        match self {
            Self::Bits64 => CompactId::max_node_id(),
            Self::Bits128 => ExtendedId::max_node_id(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Decimal,
    Hex,
    Base36,
}

impl Format {
    /// The text radix, or `None` for plain decimal.
    pub const fn radix(self) -> Option<Radix> {
        match self {
            Self::Decimal => None,
            Self::Hex => Some(Radix::Hex),
            Self::Base36 => Some(Radix::Base36),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub node_id: u64,
    pub epoch: Duration,
    pub clock: ClockKind,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        count: usize,
        width: Width,
        format: Format,
        unpadded: bool,
    },
    Extract {
        id: String,
        width: Width,
        format: Format,
    },
}

impl AppConfig {
    /// Identifier width the action works on.
    pub fn width(&self) -> Width {
        match &self.action {
            Action::Generate { width, .. } | Action::Extract { width, .. } => *width,
        }
    }
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let action = match args.command {
            Command::Generate {
                count,
                width,
                format,
                unpadded,
            } => {
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                if unpadded && format == Format::Decimal {
                    bail!("--unpadded only applies to hex and base36 output");
                }
                Action::Generate {
                    count,
                    width,
                    format,
                    unpadded,
                }
            }
            Command::Extract { id, width, format } => {
                let id = id.trim().to_owned();
                if id.is_empty() {
                    bail!("ID must not be empty");
                }
                Action::Extract { id, width, format }
            }
        };

        Ok(Self {
            node_id: args.node_id,
            epoch: Duration::from_millis(args.epoch_ms),
            clock: args.clock,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<AppConfig> {
        let args = CliArgs::try_parse_from(args)?;
        AppConfig::try_from(args)
    }

    #[test]
    fn defaults() {
        let config = parse(&["snowmint", "generate"]).unwrap();
        assert_eq!(config.node_id, 0);
        assert_eq!(config.epoch, DEFAULT_EPOCH);
        assert_eq!(config.clock, ClockKind::System);
        assert_eq!(
            config.action,
            Action::Generate {
                count: 1,
                width: Width::Bits64,
                format: Format::Decimal,
                unpadded: false,
            }
        );
    }

    #[test]
    fn global_options_after_the_subcommand() {
        let config = parse(&[
            "snowmint",
            "generate",
            "--count",
            "5",
            "--width",
            "128",
            "--format",
            "base36",
            "--unpadded",
            "--node-id",
            "1981",
            "--epoch-ms",
            "0",
            "--clock",
            "monotonic",
        ])
        .unwrap();
        assert_eq!(config.node_id, 1981);
        assert_eq!(config.epoch, Duration::ZERO);
        assert_eq!(config.clock, ClockKind::Monotonic);
        assert_eq!(config.width(), Width::Bits128);
        assert_eq!(
            config.action,
            Action::Generate {
                count: 5,
                width: Width::Bits128,
                format: Format::Base36,
                unpadded: true,
            }
        );
    }

    #[test]
    fn extract_takes_a_positional_id() {
        let config = parse(&["snowmint", "extract", " 00ff ", "-f", "hex"]).unwrap();
        assert_eq!(
            config.action,
            Action::Extract {
                id: "00ff".to_owned(),
                width: Width::Bits64,
                format: Format::Hex,
            }
        );
    }

    #[test]
    fn rejects_zero_count() {
        let err = parse(&["snowmint", "generate", "-n", "0"]).unwrap_err();
        assert!(err.to_string().contains("--count"));
    }

    #[test]
    fn rejects_unpadded_decimal() {
        assert!(parse(&["snowmint", "generate", "--unpadded"]).is_err());
    }

    #[test]
    fn rejects_blank_extract_id() {
        assert!(parse(&["snowmint", "extract", "  "]).is_err());
    }

    #[test]
    fn rejects_unknown_width() {
        assert!(parse(&["snowmint", "generate", "--width", "32"]).is_err());
    }

    #[test]
    fn oversized_node_id_is_accepted() {
        let config = parse(&["snowmint", "--node-id", "5000", "generate"]).unwrap();
        assert_eq!(config.node_id, 5000);
        assert!(config.node_id > config.width().max_node_id());
    }

    #[test]
    fn width_node_limits() {
        assert_eq!(Width::Bits64.max_node_id(), 1023);
        assert_eq!(Width::Bits128.max_node_id(), (1 << 48) - 1);
    }
}
