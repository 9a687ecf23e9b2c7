use chrono::NaiveDate;

use crate::schema::{ClaimStatus, InsuranceClaim, short_id};
use crate::validation::ValidationErrors;

/// Claim submission form input before validation
#[derive(Debug, Clone, Default)]
pub struct ClaimForm {
    pub patient_id: String,
    pub patient_name: String,
    pub payer: String,
    pub claim_amount: f64,
}

/// Claims tracking screen state
///
/// Owns the working list seeded from the store. New submissions start
/// Pending with nothing approved; adjudication results arrive through
/// `update_status`, which enforces the approved-amount and denial-reason
/// invariants.
#[derive(Debug, Default)]
pub struct ClaimsScreen {
    claims: Vec<InsuranceClaim>,
}

impl ClaimsScreen {
    pub fn new(claims: Vec<InsuranceClaim>) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &[InsuranceClaim] {
        &self.claims
    }

    /// Submit a new claim from the form
    ///
    /// Rejection leaves the list untouched and returns field-keyed messages.
    pub fn submit(
        &mut self,
        form: ClaimForm,
        today: NaiveDate,
    ) -> Result<&InsuranceClaim, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if form.patient_name.trim().is_empty() {
            errors.add("patient_name", "Patient is required");
        }
        if form.payer.trim().is_empty() {
            errors.add("payer", "Payer is required");
        }
        if form.claim_amount <= 0.0 {
            errors.add("claim_amount", "Claim amount must be greater than zero");
        }
        errors.into_result()?;

        self.claims.push(InsuranceClaim {
            claim_id: short_id("clm"),
            patient_id: form.patient_id,
            patient_name: form.patient_name,
            payer: form.payer,
            claim_amount: form.claim_amount,
            approved_amount: 0.0,
            status: ClaimStatus::Pending,
            processing_days: 0,
            denial_reason: None,
            submitted_date: today,
        });
        Ok(self.claims.last().expect("claim just pushed"))
    }

    /// Apply an adjudication result to a tracked claim
    ///
    /// Enforces the record invariants: an approved amount is only carried by
    /// an Approved claim, and a denial reason is required on (and limited
    /// to) a Denied one.
    pub fn update_status(
        &mut self,
        claim_id: &str,
        status: ClaimStatus,
        approved_amount: f64,
        denial_reason: Option<String>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if status != ClaimStatus::Approved && approved_amount != 0.0 {
            errors.add(
                "approved_amount",
                "Approved amount must be zero unless the claim is approved",
            );
        }
        if status == ClaimStatus::Denied && denial_reason.is_none() {
            errors.add("denial_reason", "A denial reason is required");
        }
        if status != ClaimStatus::Denied && denial_reason.is_some() {
            errors.add("denial_reason", "Only a denied claim carries a reason");
        }
        let Some(claim) = self.claims.iter_mut().find(|c| c.claim_id == claim_id) else {
            errors.add("claim_id", "Unknown claim id");
            return Err(errors);
        };
        errors.into_result()?;

        claim.status = status;
        claim.approved_amount = approved_amount;
        claim.denial_reason = denial_reason;
        Ok(())
    }
}

/// Filter the claims list for display
///
/// Case-insensitive substring match over claim id and patient name, AND an
/// optional status equality filter. Equivalent to intersecting the two
/// predicates independently.
pub fn filter_claims<'a>(
    claims: &'a [InsuranceClaim],
    search: &str,
    status: Option<ClaimStatus>,
) -> Vec<&'a InsuranceClaim> {
    let needle = search.to_lowercase();
    claims
        .iter()
        .filter(|claim| {
            let text_match = needle.is_empty()
                || claim.claim_id.to_lowercase().contains(&needle)
                || claim.patient_name.to_lowercase().contains(&needle);
            let status_match = status.is_none_or(|s| claim.status == s);
            text_match && status_match
        })
        .collect()
}

/// Stat card numbers for the claims screen header
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClaimStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub denied: usize,
    pub processing: usize,
    pub total_claimed: f64,
    pub total_approved: f64,
    pub approval_rate: f64,
    pub avg_processing_days: f64,
}

/// Aggregate the claims list into stat-card numbers
///
/// Approval rate counts only claims that reached a terminal state
/// (approved or denied).
pub fn claim_stats(claims: &[InsuranceClaim]) -> ClaimStats {
    let mut stats = ClaimStats {
        total: claims.len(),
        ..Default::default()
    };
    let mut processing_days_sum = 0u64;
    for claim in claims {
        stats.total_claimed += claim.claim_amount;
        stats.total_approved += claim.approved_amount;
        processing_days_sum += u64::from(claim.processing_days);
        match claim.status {
            ClaimStatus::Approved => stats.approved += 1,
            ClaimStatus::Pending => stats.pending += 1,
            ClaimStatus::Denied => stats.denied += 1,
            ClaimStatus::Processing => stats.processing += 1,
        }
    }
    let settled = stats.approved + stats.denied;
    if settled > 0 {
        stats.approval_rate = stats.approved as f64 / settled as f64 * 100.0;
    }
    if stats.total > 0 {
        stats.avg_processing_days = processing_days_sum as f64 / stats.total as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::mock_claim;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn seeded() -> Vec<InsuranceClaim> {
        let mut approved = mock_claim();
        approved.claim_id = "clm-a".to_string();
        approved.patient_name = "Maria Gonzalez".to_string();
        approved.status = ClaimStatus::Approved;
        approved.approved_amount = 700.0;
        approved.processing_days = 6;

        let mut denied = mock_claim();
        denied.claim_id = "clm-b".to_string();
        denied.patient_name = "Robert King".to_string();
        denied.status = ClaimStatus::Denied;
        denied.denial_reason = Some("Out of network".to_string());
        denied.processing_days = 12;

        let mut pending = mock_claim();
        pending.claim_id = "clm-c".to_string();
        pending.patient_name = "Maria Santos".to_string();

        vec![approved, denied, pending]
    }

    #[test]
    fn test_submit_valid_claim() {
        let mut screen = ClaimsScreen::new(vec![]);
        let form = ClaimForm {
            patient_id: "pat-9".to_string(),
            patient_name: "Sam Lee".to_string(),
            payer: "anthem".to_string(),
            claim_amount: 320.0,
        };
        let claim = screen.submit(form, today()).unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.approved_amount, 0.0);
        assert!(claim.denial_reason.is_none());
        assert_eq!(claim.submitted_date, today());
        assert_eq!(screen.claims().len(), 1);
    }

    #[test]
    fn test_submit_invalid_claim_rejected() {
        let mut screen = ClaimsScreen::new(vec![]);
        let form = ClaimForm {
            patient_id: String::new(),
            patient_name: "  ".to_string(),
            payer: String::new(),
            claim_amount: 0.0,
        };
        let err = screen.submit(form, today()).unwrap_err();
        assert!(err.get("patient_name").is_some());
        assert!(err.get("payer").is_some());
        assert!(err.get("claim_amount").is_some());
        assert!(screen.claims().is_empty());
    }

    #[test]
    fn test_update_status_enforces_invariants() {
        let mut screen = ClaimsScreen::new(seeded());

        // approval with a denial reason is inconsistent
        let err = screen
            .update_status(
                "clm-c",
                ClaimStatus::Approved,
                400.0,
                Some("wrong".to_string()),
            )
            .unwrap_err();
        assert!(err.get("denial_reason").is_some());

        // denial without a reason is inconsistent
        let err = screen
            .update_status("clm-c", ClaimStatus::Denied, 0.0, None)
            .unwrap_err();
        assert!(err.get("denial_reason").is_some());

        // approved amount on a non-approved claim is inconsistent
        let err = screen
            .update_status("clm-c", ClaimStatus::Processing, 100.0, None)
            .unwrap_err();
        assert!(err.get("approved_amount").is_some());

        screen
            .update_status("clm-c", ClaimStatus::Approved, 400.0, None)
            .unwrap();
        let claim = screen
            .claims()
            .iter()
            .find(|c| c.claim_id == "clm-c")
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Approved);
        assert_eq!(claim.approved_amount, 400.0);
    }

    #[test]
    fn test_update_unknown_claim() {
        let mut screen = ClaimsScreen::new(seeded());
        let err = screen
            .update_status("clm-zz", ClaimStatus::Processing, 0.0, None)
            .unwrap_err();
        assert!(err.get("claim_id").is_some());
    }

    /// Filtering by denied returns exactly the denied subset
    #[test]
    fn test_status_filter_exact() {
        let claims = seeded();
        let denied = filter_claims(&claims, "", Some(ClaimStatus::Denied));
        assert_eq!(denied.len(), 1);
        assert!(denied.iter().all(|c| c.status == ClaimStatus::Denied));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let claims = seeded();
        let hits = filter_claims(&claims, "MARIA", None);
        assert_eq!(hits.len(), 2);
        let hits = filter_claims(&claims, "clm-b", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient_name, "Robert King");
    }

    /// search AND status == intersection of the independent predicates
    #[test]
    fn test_combined_filter_is_intersection() {
        let claims = seeded();
        let combined = filter_claims(&claims, "maria", Some(ClaimStatus::Pending));
        let by_text: Vec<&str> = filter_claims(&claims, "maria", None)
            .iter()
            .map(|c| c.claim_id.as_str())
            .collect();
        let by_status: Vec<&str> = filter_claims(&claims, "", Some(ClaimStatus::Pending))
            .iter()
            .map(|c| c.claim_id.as_str())
            .collect();
        let expected: Vec<&str> = by_text
            .iter()
            .filter(|id| by_status.contains(id))
            .copied()
            .collect();
        let got: Vec<&str> = combined.iter().map(|c| c.claim_id.as_str()).collect();
        assert_eq!(got, expected);
        assert_eq!(got, vec!["clm-c"]);
    }

    #[test]
    fn test_claim_stats() {
        let stats = claim_stats(&seeded());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.denied, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_claimed, 2550.0);
        assert_eq!(stats.total_approved, 700.0);
        assert_eq!(stats.approval_rate, 50.0);
        assert!((stats.avg_processing_days - 22.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_claim_stats_empty() {
        let stats = claim_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.approval_rate, 0.0);
        assert_eq!(stats.avg_processing_days, 0.0);
    }
}
