use serde_json::json;

use crate::cli::{ControlArgs, GlobalOpts};
use crate::error::CliError;

/// `shade control <room> <action> [-d direction]`
pub async fn handle(args: ControlArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let dispatcher = super::dispatcher(&cfg)?;

    let direction = args.direction.as_deref().filter(|d| !d.is_empty());
    let outcome = dispatcher
        .control(&args.room, &args.action, direction)
        .await?;

    super::print_json(&json!({
        "status": "success",
        "message": outcome.message,
    }))
}
