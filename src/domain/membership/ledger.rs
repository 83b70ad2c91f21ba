//! Membership ledger - plan activity, remaining days and pro-rated refunds.
//!
//! Every function here is pure and works at calendar-day granularity. The
//! caller supplies "today" so the same inputs always give the same answer.
//!
//! Purchase slices are expected in "most recent first" order, which is how
//! the repositories return them.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::{MembershipError, PlanStatus, Purchase};

/// Tie-break used when several purchases are active at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveSelection {
    /// First qualifying purchase in input order, i.e. the most recently added.
    #[default]
    FirstListed,
    /// Qualifying purchase with the earliest end date.
    SoonestExpiring,
}

/// Refund figures for an early cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefundQuote {
    pub days_remaining: i64,
    pub total_window_days: i64,
    pub amount: i64,
}

/// Signed whole days from `today` until the purchase ends.
///
/// Negative once the purchase has expired; see [`days_remaining_clamped`].
pub fn days_remaining(purchase: &Purchase, today: NaiveDate) -> i64 {
    (purchase.end_date - today).num_days()
}

/// [`days_remaining`] floored at zero, for display.
pub fn days_remaining_clamped(purchase: &Purchase, today: NaiveDate) -> i64 {
    days_remaining(purchase, today).max(0)
}

/// Length of the billing window in days.
///
/// A window of zero (or negative) length has no daily rate and is reported
/// as [`MembershipError::ZeroLengthWindow`].
pub fn total_window_days(purchase: &Purchase) -> Result<i64, MembershipError> {
    let days = (purchase.end_date - purchase.start_date).num_days();
    if days <= 0 {
        return Err(MembershipError::ZeroLengthWindow(purchase.id));
    }
    Ok(days)
}

/// Paid and not yet expired. A plan ending today is still active today.
pub fn is_active(purchase: &Purchase, today: NaiveDate) -> bool {
    purchase.is_completed() && purchase.end_date >= today
}

/// The account's active purchase under the default policy.
pub fn active_purchase(purchases: &[Purchase], today: NaiveDate) -> Option<&Purchase> {
    select_active(purchases, today, ActiveSelection::FirstListed)
}

pub fn select_active(
    purchases: &[Purchase],
    today: NaiveDate,
    policy: ActiveSelection,
) -> Option<&Purchase> {
    let mut active = purchases.iter().filter(|p| is_active(p, today));
    match policy {
        ActiveSelection::FirstListed => active.next(),
        // min_by_key keeps the first of equal keys, so input order still breaks ties
        ActiveSelection::SoonestExpiring => active.min_by_key(|p| p.end_date),
    }
}

pub fn has_active_plan(purchases: &[Purchase], today: NaiveDate) -> bool {
    purchases.iter().any(|p| is_active(p, today))
}

pub fn reconciled_plan_status(purchases: &[Purchase], today: NaiveDate) -> PlanStatus {
    PlanStatus::from(has_active_plan(purchases, today))
}

/// Pro-rated refund: `amount / window * remaining`, rounded half up.
///
/// Only an active purchase has a refund. Remaining days are capped at the
/// window length, so a plan that has not started yet refunds in full.
pub fn refund_amount(purchase: &Purchase, today: NaiveDate) -> Result<i64, MembershipError> {
    quote_refund(purchase, today).map(|q| q.amount)
}

pub fn quote_refund(purchase: &Purchase, today: NaiveDate) -> Result<RefundQuote, MembershipError> {
    if !is_active(purchase, today) {
        return Err(MembershipError::PurchaseNotActive(purchase.id));
    }
    let window = total_window_days(purchase)?;
    let remaining = days_remaining(purchase, today).clamp(0, window);

    // round(a * r / w) == floor((2ar + w) / 2w), exact in integers
    let numerator = 2 * i128::from(purchase.amount) * i128::from(remaining) + i128::from(window);
    let amount = numerator.div_euclid(2 * i128::from(window));

    Ok(RefundQuote {
        days_remaining: remaining,
        total_window_days: window,
        amount: i64::try_from(amount)
            .map_err(|_| MembershipError::validation("amount", "refund out of range"))?,
    })
}

/// Longest lookahead the expiry-reminder scan accepts.
pub const MAX_REMINDER_LOOKAHEAD_DAYS: u32 = 30;

/// Last calendar day covered by a lookahead of `lookahead_days` from `today`.
pub fn lookahead_horizon(
    today: NaiveDate,
    lookahead_days: u32,
) -> Result<NaiveDate, MembershipError> {
    today
        .checked_add_signed(Duration::days(i64::from(lookahead_days)))
        .ok_or_else(|| MembershipError::validation("days", "lookahead runs past the calendar"))
}

/// Completed purchases ending after today and no later than `lookahead_days` from now.
///
/// Used by the expiry-reminder scan, which looks at every purchase rather
/// than only the one [`active_purchase`] would pick.
pub fn expiring_within(
    purchases: &[Purchase],
    today: NaiveDate,
    lookahead_days: u32,
) -> Result<Vec<&Purchase>, MembershipError> {
    let horizon = lookahead_horizon(today, lookahead_days)?;
    Ok(purchases
        .iter()
        .filter(|p| p.is_completed() && p.end_date > today && p.end_date <= horizon)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::purchase::fixtures::{date, purchase};
    use crate::domain::membership::PaymentStatus::{Completed, Pending};
    use proptest::prelude::*;

    // ════════════════════════════════════════════════════════════════════════════
    // Days and windows
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn thirty_day_plan_ten_days_in() {
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 31), Completed, 3000);
        let today = date(2024, 1, 11);

        assert_eq!(days_remaining(&p, today), 20);
        assert_eq!(total_window_days(&p).unwrap(), 30);
        assert_eq!(refund_amount(&p, today).unwrap(), 2000);
    }

    #[test]
    fn expired_purchase_has_negative_raw_days() {
        let p = purchase("acc", date(2023, 11, 1), date(2023, 12, 1), Completed, 3000);
        let today = date(2024, 1, 1);
        assert_eq!(days_remaining(&p, today), -31);
        assert_eq!(days_remaining_clamped(&p, today), 0);
    }

    #[test]
    fn window_spanning_leap_day_counts_feb_29() {
        let p = purchase("acc", date(2024, 2, 1), date(2024, 3, 1), Completed, 2900);
        assert_eq!(total_window_days(&p).unwrap(), 29);

        let non_leap = purchase("acc", date(2023, 2, 1), date(2023, 3, 1), Completed, 2800);
        assert_eq!(total_window_days(&non_leap).unwrap(), 28);
    }

    #[test]
    fn zero_length_window_is_an_error() {
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 1), Completed, 3000);
        assert!(matches!(
            total_window_days(&p),
            Err(MembershipError::ZeroLengthWindow(id)) if id == p.id
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Active selection
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn first_listed_active_purchase_wins() {
        let purchases = vec![
            purchase("acc", date(2023, 12, 6), date(2024, 1, 5), Completed, 3000),
            purchase("acc", date(2023, 11, 1), date(2023, 12, 1), Completed, 3000),
        ];
        let today = date(2024, 1, 1);

        let active = active_purchase(&purchases, today).unwrap();
        assert_eq!(active.end_date, date(2024, 1, 5));
        assert_eq!(reconciled_plan_status(&purchases, today), PlanStatus::Active);
    }

    #[test]
    fn pending_and_expired_purchases_are_never_selected() {
        let purchases = vec![
            purchase("acc", date(2024, 1, 1), date(2024, 2, 1), Pending, 3000),
            purchase("acc", date(2023, 11, 1), date(2023, 12, 1), Completed, 3000),
        ];
        let today = date(2024, 1, 10);
        assert!(active_purchase(&purchases, today).is_none());
        assert_eq!(reconciled_plan_status(&purchases, today), PlanStatus::Inactive);
    }

    #[test]
    fn plan_ending_today_is_still_active() {
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 31), Completed, 3000);
        assert!(is_active(&p, date(2024, 1, 31)));
        assert!(!is_active(&p, date(2024, 2, 1)));
    }

    #[test]
    fn soonest_expiring_policy_picks_earliest_end() {
        let purchases = vec![
            purchase("acc", date(2024, 1, 1), date(2024, 4, 1), Completed, 9000),
            purchase("acc", date(2024, 1, 1), date(2024, 2, 1), Completed, 3000),
        ];
        let today = date(2024, 1, 10);

        let first = select_active(&purchases, today, ActiveSelection::FirstListed).unwrap();
        let soonest = select_active(&purchases, today, ActiveSelection::SoonestExpiring).unwrap();
        assert_eq!(first.end_date, date(2024, 4, 1));
        assert_eq!(soonest.end_date, date(2024, 2, 1));
    }

    #[test]
    fn no_purchases_means_inactive() {
        assert_eq!(reconciled_plan_status(&[], date(2024, 1, 1)), PlanStatus::Inactive);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Refunds
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn refund_on_expired_purchase_is_refused() {
        let p = purchase("acc", date(2023, 11, 1), date(2023, 12, 1), Completed, 3000);
        assert!(matches!(
            refund_amount(&p, date(2024, 1, 1)),
            Err(MembershipError::PurchaseNotActive(_))
        ));
    }

    #[test]
    fn refund_on_pending_purchase_is_refused() {
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 31), Pending, 3000);
        assert!(refund_amount(&p, date(2024, 1, 11)).is_err());
    }

    #[test]
    fn refund_is_zero_on_last_day() {
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 31), Completed, 3000);
        assert_eq!(refund_amount(&p, date(2024, 1, 31)).unwrap(), 0);
    }

    #[test]
    fn refund_rounds_half_up() {
        // 100 / 8 * 1 = 12.5
        let p = purchase("acc", date(2024, 1, 1), date(2024, 1, 9), Completed, 100);
        assert_eq!(refund_amount(&p, date(2024, 1, 8)).unwrap(), 13);
        // 100 / 3 * 1 = 33.33
        let q = purchase("acc", date(2024, 1, 1), date(2024, 1, 4), Completed, 100);
        assert_eq!(refund_amount(&q, date(2024, 1, 3)).unwrap(), 33);
    }

    #[test]
    fn refund_before_start_is_full_amount() {
        let p = purchase("acc", date(2024, 2, 1), date(2024, 3, 2), Completed, 3000);
        let quote = quote_refund(&p, date(2024, 1, 15)).unwrap();
        assert_eq!(quote.days_remaining, quote.total_window_days);
        assert_eq!(quote.amount, 3000);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Expiry scan
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn expiring_within_excludes_today_and_beyond_horizon() {
        let today = date(2024, 1, 10);
        let purchases = vec![
            purchase("a", date(2023, 12, 10), date(2024, 1, 10), Completed, 1),
            purchase("b", date(2023, 12, 11), date(2024, 1, 11), Completed, 1),
            purchase("c", date(2023, 12, 12), date(2024, 1, 12), Completed, 1),
            purchase("d", date(2023, 12, 13), date(2024, 1, 13), Completed, 1),
            purchase("e", date(2023, 12, 12), date(2024, 1, 12), Pending, 1),
        ];

        let ends: Vec<_> = expiring_within(&purchases, today, 2)
            .unwrap()
            .into_iter()
            .map(|p| p.account_id.as_str().to_string())
            .collect();
        assert_eq!(ends, vec!["b", "c"]);
    }

    #[test]
    fn expiring_within_zero_lookahead_is_empty() {
        let today = date(2024, 1, 10);
        let purchases = vec![purchase("a", date(2023, 12, 11), date(2024, 1, 11), Completed, 1)];
        assert!(expiring_within(&purchases, today, 0).unwrap().is_empty());
    }

    #[test]
    fn lookahead_past_the_calendar_is_a_validation_error() {
        let today = date(2024, 1, 10);
        let purchases = vec![purchase("a", date(2023, 12, 11), date(2024, 1, 11), Completed, 1)];

        let err = expiring_within(&purchases, today, u32::MAX).unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed { ref field, .. } if field == "days"));
        assert!(lookahead_horizon(NaiveDate::MAX, 1).is_err());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn refund_never_increases_as_time_passes(
            duration in 1i64..400,
            amount in 1i64..1_000_000,
            a in 0i64..400,
            b in 0i64..400,
        ) {
            let start = date(2024, 1, 1);
            let end = start + Duration::days(duration);
            let p = purchase("acc", start, end, Completed, amount);
            let (earlier, later) = (a.min(b).min(duration), a.max(b).min(duration));

            let r1 = refund_amount(&p, start + Duration::days(earlier)).unwrap();
            let r2 = refund_amount(&p, start + Duration::days(later)).unwrap();
            prop_assert!(r1 >= r2);
            prop_assert!(r1 <= amount);
        }

        #[test]
        fn active_purchases_have_non_negative_days(
            duration in 1i64..400,
            offset in 0i64..400,
        ) {
            let start = date(2024, 1, 1);
            let p = purchase("acc", start, start + Duration::days(duration), Completed, 100);
            let today = start + Duration::days(offset);
            if is_active(&p, today) {
                prop_assert!(days_remaining(&p, today) >= 0);
                prop_assert_eq!(reconciled_plan_status(std::slice::from_ref(&p), today), PlanStatus::Active);
            } else {
                prop_assert!(active_purchase(std::slice::from_ref(&p), today).is_none());
            }
        }

        #[test]
        fn window_matches_calendar_difference(
            start_offset in 0i64..3000,
            duration in 1i64..800,
        ) {
            let start = date(2020, 1, 1) + Duration::days(start_offset);
            let end = start + Duration::days(duration);
            let p = purchase("acc", start, end, Completed, 100);
            prop_assert_eq!(total_window_days(&p).unwrap(), (end - start).num_days());
        }
    }
}
