//! Enrollment orchestration: the claim-and-assign workflow.
//!
//! [`enroll`] is the single entrypoint for both fresh signups and repeat
//! visits. It resolves or creates the enrollment for an (email, campaign)
//! pair, then walks the campaign's active products and materializes one
//! assignment per product through [`ensure_assignment`], each carrying a
//! point-in-time snapshot of an atomically claimed review text.
//!
//! Concurrency is delegated downward: the claim itself is a locked
//! single-row transition in `TextOptionRepo::claim`, enrollment
//! uniqueness is the database constraint, and assignment uniqueness is an
//! `ON CONFLICT DO NOTHING` insert. Nothing here pre-checks and then
//! writes on a result that another request could invalidate.

use reviewdrop_core::email;
use reviewdrop_core::error::CoreError;
use reviewdrop_core::types::DbId;
use reviewdrop_db::models::assignment::Assignment;
use reviewdrop_db::models::campaign::Campaign;
use reviewdrop_db::models::enrollment::Enrollment;
use reviewdrop_db::models::product::Product;
use reviewdrop_db::repositories::{
    AssignmentRepo, EnrollmentRepo, ProductRepo, TextOptionRepo,
};
use reviewdrop_db::{is_unique_violation, DbPool};

use crate::error::{AppError, AppResult};
use crate::notifications::Notifier;

/// Result of [`ensure_assignment`] for one (enrollment, product) pair.
#[derive(Debug)]
pub enum EnsureOutcome {
    /// An intact assignment already existed; nothing was claimed.
    Existing(Assignment),
    /// A text was claimed and a new assignment created.
    Created(Assignment),
    /// An assignment with an empty snapshot was re-pointed at a freshly
    /// claimed text.
    Repaired(Assignment),
    /// The product's pool is exhausted; no assignment exists for it.
    Skipped,
}

/// What [`enroll`] hands back to the HTTP layer.
#[derive(Debug)]
pub struct EnrollmentOutcome {
    pub enrollment: Enrollment,
    /// Assignments in product-position order.
    pub assignments: Vec<Assignment>,
    /// Active products left without an assignment because their pool ran
    /// dry mid-flight.
    pub skipped_product_ids: Vec<DbId>,
    /// True when this call created the enrollment row (fresh signup).
    pub created: bool,
}

/// Resolve or create the enrollment for `raw_email` in `campaign`, then
/// ensure an assignment for every active product.
///
/// Fresh signups are pre-checked: if any active product already has zero
/// available texts, no enrollment row is written and the caller gets
/// [`CoreError::CampaignFull`]. Revisits skip the pre-check and tolerate
/// partial assignment instead, so inventory added later is picked up and
/// corrupted snapshots are repaired.
pub async fn enroll(
    pool: &DbPool,
    notifier: &Notifier,
    campaign: &Campaign,
    raw_email: &str,
) -> AppResult<EnrollmentOutcome> {
    let email = email::normalize(raw_email);
    if !email::is_plausible(&email) {
        return Err(CoreError::Validation(format!("'{email}' is not a valid email")).into());
    }

    let products = ProductRepo::list_active_by_campaign(pool, campaign.id).await?;

    let existing =
        EnrollmentRepo::find_by_email_campaign(pool, &email, campaign.id).await?;

    let (enrollment, created) = match existing {
        Some(enrollment) => (enrollment, false),
        None => create_enrollment(pool, campaign, &email).await?,
    };

    let mut assignments = Vec::with_capacity(products.len());
    let mut skipped_product_ids = Vec::new();

    for product in &products {
        match ensure_assignment(pool, &enrollment, product).await? {
            EnsureOutcome::Existing(a)
            | EnsureOutcome::Created(a)
            | EnsureOutcome::Repaired(a) => assignments.push(a),
            EnsureOutcome::Skipped => {
                tracing::warn!(
                    enrollment_id = enrollment.id,
                    product_id = product.id,
                    "product out of review texts, assignment skipped"
                );
                skipped_product_ids.push(product.id);
            }
        }
    }

    // Low-stock side channel. Failures here must never surface to the
    // participant, so the count query error is only logged.
    match TextOptionRepo::available_counts_by_campaign(pool, campaign.id).await {
        Ok(counts) => notifier.spawn_low_stock(campaign, &counts),
        Err(err) => {
            tracing::warn!(error = %err, campaign_id = campaign.id, "low-stock count failed");
        }
    }

    Ok(EnrollmentOutcome {
        enrollment,
        assignments,
        skipped_product_ids,
        created,
    })
}

/// Fresh-signup path: pre-check inventory, then insert.
///
/// The pre-check is advisory (a concurrent signup can still drain a pool
/// between check and claim); its job is to refuse obviously-doomed
/// signups before an enrollment row exists. Losing the insert race is
/// folded into the revisit path.
async fn create_enrollment(
    pool: &DbPool,
    campaign: &Campaign,
    email: &str,
) -> AppResult<(Enrollment, bool)> {
    let counts = TextOptionRepo::available_counts_by_campaign(pool, campaign.id).await?;
    if let Some(empty) = counts.iter().find(|s| s.available == 0) {
        return Err(CoreError::CampaignFull {
            product_id: empty.product_id,
        }
        .into());
    }

    match EnrollmentRepo::create(pool, email, campaign.id).await {
        Ok(enrollment) => Ok((enrollment, true)),
        Err(err) if is_unique_violation(&err, "uq_enrollments_email_campaign") => {
            tracing::debug!(
                campaign_id = campaign.id,
                "lost enrollment insert race, continuing as revisit"
            );
            let enrollment =
                EnrollmentRepo::find_by_email_campaign(pool, email, campaign.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(
                            "enrollment vanished after unique violation".into(),
                        )
                    })?;
            Ok((enrollment, false))
        }
        Err(err) => Err(err.into()),
    }
}

/// Ensure exactly one assignment exists for (enrollment, product).
///
/// Idempotent: an intact assignment is returned as-is so repeat visits
/// never burn additional claims. An assignment whose snapshot is empty
/// (legacy defect) has its stale text option released back to the pool,
/// a fresh text claimed, and the snapshot backfilled.
pub async fn ensure_assignment(
    pool: &DbPool,
    enrollment: &Enrollment,
    product: &Product,
) -> AppResult<EnsureOutcome> {
    match AssignmentRepo::find_by_enrollment_product(pool, enrollment.id, product.id).await? {
        Some(existing) if !existing.text_snapshot_md.trim().is_empty() => {
            Ok(EnsureOutcome::Existing(existing))
        }
        Some(corrupt) => repair_assignment(pool, enrollment, product, corrupt).await,
        None => create_assignment(pool, enrollment, product).await,
    }
}

/// Claim a text and insert a fresh assignment.
async fn create_assignment(
    pool: &DbPool,
    enrollment: &Enrollment,
    product: &Product,
) -> AppResult<EnsureOutcome> {
    let Some(option_id) = TextOptionRepo::claim(pool, product.id, &enrollment.email).await?
    else {
        return Ok(EnsureOutcome::Skipped);
    };

    let option = TextOptionRepo::find_by_id(pool, option_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("claimed text option {option_id} vanished"))
        })?;

    match AssignmentRepo::create(pool, enrollment.id, product.id, option_id, &option.text_md)
        .await?
    {
        Some(assignment) => Ok(EnsureOutcome::Created(assignment)),
        None => {
            // A concurrent request for the same enrollment inserted
            // first. Give the claimed text back and use the winner's row.
            TextOptionRepo::release(pool, option_id).await?;
            let existing =
                AssignmentRepo::find_by_enrollment_product(pool, enrollment.id, product.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(
                            "assignment vanished after insert conflict".into(),
                        )
                    })?;
            Ok(EnsureOutcome::Existing(existing))
        }
    }
}

/// Snapshot-repair path: release the stale option, claim fresh, re-point.
///
/// Releasing first means the stale option itself is claimable again, so
/// repair succeeds even when it was the product's last text. If the pool
/// is somehow still empty the corrupt row is left untouched for the next
/// visit.
async fn repair_assignment(
    pool: &DbPool,
    enrollment: &Enrollment,
    product: &Product,
    corrupt: Assignment,
) -> AppResult<EnsureOutcome> {
    tracing::warn!(
        assignment_id = corrupt.id,
        text_option_id = corrupt.text_option_id,
        "assignment has empty text snapshot, re-claiming"
    );

    TextOptionRepo::release(pool, corrupt.text_option_id).await?;

    let Some(option_id) = TextOptionRepo::claim(pool, product.id, &enrollment.email).await?
    else {
        return Ok(EnsureOutcome::Skipped);
    };

    let option = TextOptionRepo::find_by_id(pool, option_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("claimed text option {option_id} vanished"))
        })?;

    let repaired = AssignmentRepo::repoint(pool, corrupt.id, option_id, &option.text_md).await?;
    Ok(EnsureOutcome::Repaired(repaired))
}
