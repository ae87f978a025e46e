//! `cfg`: print the resolved arena settings with their sources.
//!
//! ```json
//! {
//!   "default_rows": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::error::CliError;
use crate::ui;
use fourline_arena::config::{self, ConfigResolved};
use std::io::Write;

/// Load settings (defaults, then `FOURLINE_CONFIG`, then `FOURLINE_*`
/// overrides) and write them as pretty JSON.
///
/// # Errors
///
/// Returns `CliError::Config` when the file or an override is invalid, and
/// `CliError::Io` when writing fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let ConfigResolved { settings, sources } = resolved;
    let display = serde_json::json!({
        "default_rows": {
            "value": settings.default_rows,
            "source": sources.default_rows,
        },
        "default_cols": {
            "value": settings.default_cols,
            "source": sources.default_cols,
        },
        "turn_timeout_secs": {
            "value": settings.turn_timeout_secs,
            "source": sources.turn_timeout_secs,
        },
        "adversary_think_ms": {
            "value": settings.adversary_think_ms,
            "source": sources.adversary_think_ms,
        },
        "idle_ttl_minutes": {
            "value": settings.idle_ttl_minutes,
            "source": sources.idle_ttl_minutes,
        },
        "default_tier": {
            "value": settings.default_tier,
            "source": sources.default_tier,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
