//! v1 Schedule handlers.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;

use crate::api::v1::dto::{AppointmentFocusResponse, CountdownResponse, ScheduleResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;
use crate::services::CountdownTicker;

/// `GET /api/v1/appointments`
#[utoipa::path(
    get,
    path = "/api/v1/appointments",
    tag = "appointments",
    operation_id = "appointments.list",
    responses(
        (status = 200, description = "Appointments ordered by start time", body = ScheduleResponse),
    )
)]
pub async fn list_appointments(State(state): State<AppState>) -> ApiResponse<ScheduleResponse> {
    match state.practice.schedule().await {
        Ok(schedule) => {
            let meta = ResponseMeta::total(schedule.appointments.len());
            ApiResponse::success_with_meta(ScheduleResponse::from(&schedule), meta)
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/appointments/{appointmentId}`
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{appointmentId}",
    tag = "appointments",
    operation_id = "appointments.get",
    params(("appointmentId" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment with its patient, countdown and recent notes", body = AppointmentFocusResponse),
        (status = 404, description = "Appointment not found", body = ApiError),
    )
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> ApiResponse<AppointmentFocusResponse> {
    match state.practice.appointment_focus(&appointment_id).await {
        Ok(focus) => ApiResponse::success(AppointmentFocusResponse::from(&focus)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/appointments/{appointmentId}/countdown`
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{appointmentId}/countdown",
    tag = "appointments",
    operation_id = "appointments.countdown",
    params(("appointmentId" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Time left until the session starts", body = CountdownResponse),
        (status = 404, description = "Appointment not found", body = ApiError),
    )
)]
pub async fn get_countdown(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> ApiResponse<CountdownResponse> {
    match state.practice.countdown(&appointment_id).await {
        Ok((appointment, countdown)) => ApiResponse::success(CountdownResponse::new(
            &appointment.id,
            appointment.time,
            countdown,
        )),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/appointments/{appointmentId}/countdown:stream`
///
/// One `countdown` event per second. The stream ends after the event whose
/// state is `started`, or when the server shuts down. Each connection owns
/// its timer; disconnecting stops it.
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{appointmentId}/countdown:stream",
    tag = "appointments",
    operation_id = "appointments.countdown.stream",
    params(("appointmentId" = String, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Server-sent `countdown` events", content_type = "text/event-stream", body = CountdownResponse),
        (status = 404, description = "Appointment not found", body = ApiError),
    )
)]
pub async fn stream_countdown(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiResponse<()>> {
    let starts_at = state.practice.appointment_start(&appointment_id).await?;

    let shutdown = state.shutdown.clone();
    let mut ticker = CountdownTicker::new(state.practice.clock());
    let mut readings = ticker.subscribe();
    ticker.start(starts_at);
    tracing::debug!(appointment_id = %appointment_id, "Countdown stream opened");

    let stream = async_stream::stream! {
        // dropping the stream drops the ticker, which cancels its timer
        let _ticker = ticker;

        loop {
            let reading = *readings.borrow_and_update();
            if let Some(countdown) = reading {
                let payload = CountdownResponse::new(&appointment_id, starts_at, countdown);
                match Event::default().event("countdown").json_data(&payload) {
                    Ok(event) => yield Ok(event),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode countdown event");
                        break;
                    }
                }
                if countdown.is_started() {
                    break;
                }
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::debug!(appointment_id = %appointment_id, "Countdown stream interrupted by shutdown");
                    break;
                }
                changed = readings.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!(appointment_id = %appointment_id, "Countdown stream closed");
    };

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
