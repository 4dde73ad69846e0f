//! Advances active devotional plans: delivers the current day's message and
//! pushes the customer's plan schedule forward.

use crate::error::Error;
use crate::templates;
use chrono::{DateTime, Duration, FixedOffset};
use entity::customers;
use entity::devotional_plans;
use entity::plan_status::PlanStatus;
use entity_api::error::EntityApiErrorKind;
use entity_api::{customer, devotional_plan};
use log::*;
use messaging::{MessageQueue, PlanDayMessage};
use sea_orm::DatabaseConnection;

/// Outcome of a best-effort follow-up action taken after a command was
/// already queued. The queued command stands either way; a failure here is
/// recorded rather than retried, so the command is neither lost nor
/// duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestEffort {
    Applied,
    RecordedFailure,
}

/// Per-candidate outcome of a plan advancement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The candidate failed validation; nothing queued, nothing mutated
    Skipped,
    /// The day message was queued; carries the fate of the follow-up
    /// bookkeeping
    Queued { reschedule: BestEffort },
}

/// Runs one plan advancement pass over every customer whose plan message is
/// due. Per-candidate failures are logged and do not abort the batch.
/// Returns how many day messages were queued.
pub async fn process_due_plan_messages(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
    interval: Duration,
    advance_day: bool,
    now: DateTime<FixedOffset>,
) -> Result<usize, Error> {
    let candidates = customer::find_due_for_plan_message(db, now).await?;

    if candidates.is_empty() {
        info!("No customers with active plans due for messages");
        return Ok(0);
    }

    info!(
        "Found {} customers with active plans due for messages",
        candidates.len()
    );

    let mut queued = 0;
    for candidate in &candidates {
        match deliver_plan_day(db, queue, candidate, interval, advance_day, now).await {
            Ok(Delivery::Queued { .. }) => queued += 1,
            Ok(Delivery::Skipped) => {}
            Err(e) => error!("Error processing plan for customer {}: {e}", candidate.id),
        }
    }

    Ok(queued)
}

/// Delivers the current day of one customer's active plan.
///
/// A missing plan, a non-active plan, or invalid day data skips the candidate
/// without queueing or mutating anything; those records are a data-quality
/// issue for the plan author, not a transient fault worth retrying.
pub async fn deliver_plan_day(
    db: &DatabaseConnection,
    queue: &dyn MessageQueue,
    customer: &customers::Model,
    interval: Duration,
    advance_day: bool,
    now: DateTime<FixedOffset>,
) -> Result<Delivery, Error> {
    let Some(plan_id) = &customer.active_plan_id else {
        warn!("Customer {} has no active plan id, skipping", customer.id);
        return Ok(Delivery::Skipped);
    };

    debug!("Processing plan {plan_id} for customer: {}", customer.id);

    let plan = match devotional_plan::find_by_id_and_customer_id(db, plan_id, &customer.id).await {
        Ok(plan) => plan,
        Err(e) if e.error_kind == EntityApiErrorKind::RecordNotFound => {
            warn!("Plan {plan_id} not found for customer {}", customer.id);
            return Ok(Delivery::Skipped);
        }
        Err(e) => return Err(e.into()),
    };

    if plan.status != PlanStatus::Active {
        warn!(
            "Plan {} is not active (status: {}), skipping",
            plan.id, plan.status
        );
        return Ok(Delivery::Skipped);
    }

    let Some(current_day) = plan.current_day else {
        warn!("Plan {} has no current day set, skipping", plan.id);
        return Ok(Delivery::Skipped);
    };

    if plan.days.is_empty() {
        warn!("Plan {} has no day content, skipping", plan.id);
        return Ok(Delivery::Skipped);
    }

    let Some(devotion) = plan.days.day(current_day) else {
        warn!("Plan {} has invalid currentDay: {current_day}", plan.id);
        return Ok(Delivery::Skipped);
    };

    let body = templates::daily_devotion_text(
        devotion.verse_reference.as_deref(),
        devotion.verse_text.as_deref(),
        devotion.reflection.as_deref(),
        devotion.journal_prompt.as_deref(),
        current_day,
    );

    let message = PlanDayMessage::for_day(
        &customer.id,
        Some(customer.phone.clone()),
        &plan.id,
        current_day,
        body,
    );
    queue.enqueue(&message.into()).await?;

    info!(
        "Queued Day {current_day} message for plan {}, customer {}",
        plan.id, customer.id
    );

    let reschedule = record_delivery(db, customer, &plan, interval, advance_day, now).await;

    Ok(Delivery::Queued { reschedule })
}

/// Best-effort bookkeeping once the day message is on the queue: moves the
/// customer's plan schedule forward and, when enabled, advances the plan's
/// day pointer.
async fn record_delivery(
    db: &DatabaseConnection,
    customer: &customers::Model,
    plan: &devotional_plans::Model,
    interval: Duration,
    advance_day: bool,
    now: DateTime<FixedOffset>,
) -> BestEffort {
    // TODO: respect the customer's timezone and preferred_time_of_day when
    // computing the next delivery time instead of a fixed interval.
    let next = now + interval;

    if let Err(e) = customer::reschedule_plan_message(db, customer, next).await {
        warn!(
            "Error updating next message time for customer {}: {e}",
            customer.id
        );
        return BestEffort::RecordedFailure;
    }

    // The day pointer stays within the authored range; the final day's
    // transition to completed belongs to the conversation engine downstream.
    if advance_day {
        if let Some(current_day) = plan.current_day {
            if (current_day as usize) < plan.days.len() {
                if let Err(e) = devotional_plan::advance_current_day(db, plan).await {
                    warn!("Error advancing current day for plan {}: {e}", plan.id);
                    return BestEffort::RecordedFailure;
                }
            }
        }
    }

    info!(
        "Scheduled next message for customer {} at {next}",
        customer.id
    );

    BestEffort::Applied
}
