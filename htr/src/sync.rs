//! Board ↔ wire conversion and fire-and-forget persistence
//!
//! The in-memory board is the working copy of truth; pushes to the
//! schedule service happen in the background and a failure only costs a
//! warning, never local state.

use std::sync::Arc;

use tracing::{info, warn};

use planboard::{ColumnId, PlanningSession};

use crate::api::types::{SchedulePayload, ScheduleRecord};
use crate::api::{ApiError, ScheduleClient};

/// Snapshot a session into the service's payload shape
pub fn session_to_payload(session: &PlanningSession, markers: serde_json::Value) -> SchedulePayload {
    let staging = session
        .columns()
        .get(ColumnId::Staging)
        .map(|column| column.spot_ids.clone())
        .unwrap_or_default();

    SchedulePayload {
        schedule_name: session.schedule_name().to_string(),
        location: session.location().to_string(),
        daily_routines: session.routines().to_map(),
        date_range: session.date_range().to_vec(),
        is_finished: session.is_finished(),
        spots: session.spots().iter().cloned().collect(),
        spots_id: staging,
        markers,
    }
}

/// Rebuild a session from a fetched schedule record
pub fn session_from_record(record: &ScheduleRecord) -> PlanningSession {
    let payload = &record.payload;
    PlanningSession::from_parts(
        payload.schedule_name.clone(),
        payload.location.clone(),
        payload.date_range.clone(),
        payload.is_finished,
        payload.spots.clone(),
        payload.spots_id.clone(),
        payload.daily_routines.clone(),
    )
}

/// Push a payload in the background.
///
/// `id = Some` replaces an existing schedule; `None` creates one. The task
/// logs its verdict and also hands it back through the join handle, so a
/// caller that outlives the task can surface failures as a notice. A
/// failure never touches local state.
pub fn spawn_push(
    client: Arc<ScheduleClient>,
    id: Option<i64>,
    payload: SchedulePayload,
) -> tokio::task::JoinHandle<Result<(), ApiError>> {
    tokio::spawn(async move {
        let result = match id {
            Some(id) => client.update(id, &payload).await,
            None => client.create(&payload).await,
        };
        match &result {
            Ok(()) => info!(?id, schedule_name = %payload.schedule_name, "spawn_push: saved"),
            Err(e) => warn!(?id, error = %e, "spawn_push: save failed, local state retained"),
        }
        result
    })
}
