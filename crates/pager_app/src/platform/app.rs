use std::path::PathBuf;

use anyhow::{bail, Context};
use pager_core::{
    update, AppState, Endpoint, Msg, NoticeLevel, ReplyTarget, ScrollMetrics, FIRST_PAGE,
};
use pager_engine::{
    render_snapshot, signal_bridge, snapshot_filename, EngineCommand, EngineEvent, EngineHandle,
    SnapshotWriter,
};
use pager_logging::{next_dispatch_tick, pager_debug, pager_info, pager_trace, pager_warn};

use super::config::PagerConfig;
use super::container::ResultsContainer;
use super::effects::{event_to_msg, EffectRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSummary {
    pub last_page: u32,
    pub fragments: usize,
    pub rows: usize,
    pub end_of_data: bool,
    pub stalled: bool,
    pub failed_fetches: u32,
    pub coalesced_signals: u64,
    pub snapshot: PathBuf,
}

fn listing_endpoint(config: &PagerConfig) -> anyhow::Result<Endpoint> {
    Endpoint::from_base(&config.base_url, &config.listing_path).with_context(|| {
        format!(
            "building listing url from {} and {}",
            config.base_url, config.listing_path
        )
    })
}

fn dispatch(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let tick = next_dispatch_tick();
    pager_trace!("[{}] dispatch {:?}", tick, msg);
    let (mut state, effects) = update(state, msg);
    runner.run(effects);
    if state.consume_dirty() {
        pager_debug!(
            "[{}] page={} in_flight={} has_more={} spinner={}",
            tick,
            state.current_page(),
            state.request_in_flight(),
            state.has_more(),
            runner.container().is_loading()
        );
    }
    state
}

/// Render the first page the way the server would on initial load.
fn load_first_page(
    endpoint: &Endpoint,
    runner: &mut EffectRunner,
    config: &PagerConfig,
) -> anyhow::Result<()> {
    runner.submit(EngineCommand::FetchPage {
        page: FIRST_PAGE,
        url: endpoint.page_url(FIRST_PAGE),
    });
    match runner.recv_event(config.settle_timeout()) {
        Some(EngineEvent::PageFetched { result: Ok(output), .. }) => {
            runner.container_mut().append(output.body);
            Ok(())
        }
        Some(EngineEvent::PageFetched { result: Err(err), .. }) => {
            bail!("loading {}: {}", endpoint.as_str(), err)
        }
        Some(other) => bail!("unexpected engine event {:?}", other),
        None => bail!(
            "no response from {} within {:?}",
            endpoint.as_str(),
            config.settle_timeout()
        ),
    }
}

/// Walk the listing by scrolling to the bottom until the server runs dry,
/// then write everything the container accumulated to one snapshot file.
pub fn run_scroll(config: &PagerConfig, engine: EngineHandle) -> anyhow::Result<ScrollSummary> {
    let endpoint = listing_endpoint(config)?;
    let container =
        ResultsContainer::new(config.viewport_height, config.row_height, config.measurement);
    let mut runner = EffectRunner::new(engine, container);

    load_first_page(&endpoint, &mut runner, config)?;
    pager_info!(
        "loaded {} with {} rows",
        endpoint.as_str(),
        runner.container().rows()
    );

    let mut state = AppState::new(endpoint.clone(), config.failure_policy.into());
    let (signals, pending) = signal_bridge::<ScrollMetrics>();
    let mut failures = 0u32;

    loop {
        // The window sits at the bottom after every render; a real host
        // fires a burst of scroll events here.
        for _ in 0..3 {
            signals.offer(runner.container().metrics_at_bottom());
        }
        while let Some(metrics) = pending.take() {
            state = dispatch(state, Msg::Scrolled(metrics), &mut runner);
        }

        if runner.outstanding() == 0 {
            break;
        }

        let Some(event) = runner.recv_event(config.settle_timeout()) else {
            pager_warn!("no response within {:?}; giving up", config.settle_timeout());
            break;
        };
        let msg = event_to_msg(event);
        let outcome = match &msg {
            Msg::PageLoaded { .. } => Some(true),
            Msg::PageFailed { .. } => Some(false),
            _ => None,
        };
        state = dispatch(state, msg, &mut runner);

        match outcome {
            Some(true) => failures = 0,
            Some(false) => {
                failures += 1;
                if failures > config.retry_limit {
                    pager_warn!("{} failed page requests in a row; giving up", failures);
                    break;
                }
            }
            None => {}
        }
    }

    if state.is_stalled() {
        pager_warn!(
            "pagination stalled after a failed request for page {}",
            state.current_page()
        );
    } else if state.has_more() && !runner.container().metrics_at_bottom().is_bottom_signal() {
        pager_info!("listing fits in the viewport; nothing to scroll");
    }

    let writer = SnapshotWriter::new(config.output_dir.clone());
    let content = render_snapshot(
        endpoint.as_str(),
        &chrono::Utc::now().to_rfc3339(),
        runner.container().fragments(),
    );
    let snapshot = writer
        .write(&snapshot_filename(endpoint.as_str()), &content)
        .with_context(|| format!("writing snapshot to {}", config.output_dir.display()))?;

    let view = state.view();
    let summary = ScrollSummary {
        last_page: view.current_page,
        fragments: runner.container().fragments().len(),
        rows: runner.container().rows(),
        end_of_data: !view.has_more,
        stalled: view.stalled,
        failed_fetches: view.failed_fetches,
        coalesced_signals: pending.coalesced(),
        snapshot,
    };
    pager_info!("{:?}", summary);
    Ok(summary)
}

fn drive_until_settled(
    mut state: AppState,
    runner: &mut EffectRunner,
    config: &PagerConfig,
) -> anyhow::Result<AppState> {
    while runner.outstanding() > 0 {
        let Some(event) = runner.recv_event(config.settle_timeout()) else {
            bail!("no response within {:?}", config.settle_timeout());
        };
        state = dispatch(state, event_to_msg(event), runner);
    }
    Ok(state)
}

fn ensure_success(state: &AppState) -> anyhow::Result<()> {
    match state.view().last_notice {
        Some(notice) if notice.level == NoticeLevel::Success => Ok(()),
        Some(notice) => bail!("{}", notice.message),
        None => bail!("request finished without a result"),
    }
}

/// Reply to one feedback row, then mark it replied.
pub fn run_reply(
    config: &PagerConfig,
    engine: EngineHandle,
    attributes: &[(&str, &str)],
    message: &str,
) -> anyhow::Result<()> {
    let target = ReplyTarget::from_attributes(attributes.iter().copied())
        .context("reply button needs data-tel, data-fid and id")?;
    let container =
        ResultsContainer::new(config.viewport_height, config.row_height, config.measurement);
    let mut runner = EffectRunner::new(engine, container);

    let mut state = AppState::new(listing_endpoint(config)?, config.failure_policy.into());
    state = dispatch(state, Msg::ReplyOpened(target), &mut runner);
    state = dispatch(state, Msg::ReplyDraftChanged(message.to_string()), &mut runner);
    state = dispatch(state, Msg::ReplySubmitted, &mut runner);

    let state = drive_until_settled(state, &mut runner, config)?;
    ensure_success(&state)
}

/// Ask the server to write the statistics workbook.
pub fn run_report(config: &PagerConfig, engine: EngineHandle) -> anyhow::Result<()> {
    let container =
        ResultsContainer::new(config.viewport_height, config.row_height, config.measurement);
    let mut runner = EffectRunner::new(engine, container);

    let state = AppState::new(listing_endpoint(config)?, config.failure_policy.into());
    let state = dispatch(state, Msg::GenerateReportClicked, &mut runner);

    let state = drive_until_settled(state, &mut runner, config)?;
    ensure_success(&state)
}
