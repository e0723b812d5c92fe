use std::sync::Arc;

use tracing::info;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::error::CliError;
use crate::report::ReportLog;
use crate::server::{self, AppState};

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = super::load(global)?;
    let mut settings = cfg.server_settings()?;
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }

    let dispatcher = super::dispatcher(&cfg)?;
    info!(
        rooms = dispatcher.resolver().catalog().len(),
        gateway = %dispatcher.resolver().config().host,
        "gateway configured"
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        reports: Arc::new(ReportLog::new(settings.reports_file.clone())),
    };
    server::run(&settings, state).await
}
