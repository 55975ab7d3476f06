use crate::models::FloorplanRecord;

/// Plans that are priced and not waitlisted, in input order
pub fn available(plans: &[FloorplanRecord]) -> Vec<FloorplanRecord> {
    plans.iter().filter(|p| p.is_available()).cloned().collect()
}

/// Plans priced strictly below `max_price`, in input order. Unpriced plans never pass.
pub fn in_budget(plans: &[FloorplanRecord], max_price: u64) -> Vec<FloorplanRecord> {
    plans
        .iter()
        .filter(|p| p.price.is_some_and(|price| price < max_price))
        .cloned()
        .collect()
}

/// Result of running the full set of extracted plans through both filters
#[derive(Debug, Clone)]
pub struct Shortlist {
    pub total: usize,
    pub available: Vec<FloorplanRecord>,
    pub in_budget: Vec<FloorplanRecord>,
}

impl Shortlist {
    pub fn build(plans: &[FloorplanRecord], max_price: u64) -> Self {
        let available = available(plans);
        let in_budget = in_budget(&available, max_price);
        Self {
            total: plans.len(),
            available,
            in_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(title: &str, price: Option<u64>, availability: &str) -> FloorplanRecord {
        FloorplanRecord {
            title: Some(title.to_string()),
            price,
            availability: Some(availability.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<FloorplanRecord> {
        vec![
            plan("A", Some(1200), ""),
            plan("B", Some(2000), "Waitlist Available"),
            plan("C", None, ""),
            plan("D", Some(1499), "Coming Soon"),
            plan("E", Some(1500), ""),
        ]
    }

    fn titles(plans: &[FloorplanRecord]) -> Vec<&str> {
        plans.iter().filter_map(|p| p.title.as_deref()).collect()
    }

    #[test]
    fn available_keeps_priced_non_waitlisted_in_order() {
        assert_eq!(titles(&available(&sample())), vec!["A", "D", "E"]);
    }

    #[test]
    fn budget_is_strictly_below_max() {
        let shortlist = Shortlist::build(&sample(), 1500);
        assert_eq!(shortlist.total, 5);
        assert_eq!(titles(&shortlist.available), vec!["A", "D", "E"]);
        assert_eq!(titles(&shortlist.in_budget), vec!["A", "D"]);
    }

    #[test]
    fn in_budget_is_idempotent() {
        let once = in_budget(&available(&sample()), 1500);
        let twice = in_budget(&once, 1500);
        assert_eq!(once, twice);
    }

    #[test]
    fn unpriced_plans_never_fit_the_budget() {
        assert!(in_budget(&[plan("C", None, "")], u64::MAX).is_empty());
    }

    #[test]
    fn zero_budget_admits_nothing() {
        assert!(Shortlist::build(&sample(), 0).in_budget.is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let plans = sample();
        let before = plans.clone();
        let _ = Shortlist::build(&plans, 1500);
        assert_eq!(plans, before);
    }
}
