use anyhow::Result;
use tracing_subscriber::filter::EnvFilter;

/// Install the global subscriber. Output goes to stderr so it never mixes with shell views.
///
/// `directive` (from config) wins over `verbosity` when present.
pub(crate) fn set_up(verbosity: u8, directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d)?,
        None => EnvFilter::try_new("warn")?
            .add_directive(format!("{}={}", BIN_NAME, max_level(verbosity)).parse()?),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

static BIN_NAME: &str = std::env!("CARGO_PKG_NAME");

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Count `-v` flags: `-v` is 1, `-vv` is 2, repeated flags add up.
pub(crate) fn verbosity(args: &[String]) -> u8 {
    args.iter()
        .filter(|a| is_verbosity_flag(a))
        .map(|a| (a.len() - 1) as u8)
        .fold(0u8, u8::saturating_add)
}

pub(crate) fn is_verbosity_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v')
}
