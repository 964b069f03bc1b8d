use crate::RiskTier;

#[test]
fn given_probability_below_30_when_classified_then_low() {
    assert_eq!(RiskTier::classify(0.0), RiskTier::Low);
    assert_eq!(RiskTier::classify(29.0), RiskTier::Low);
    assert_eq!(RiskTier::classify(29.9), RiskTier::Low);
}

#[test]
fn given_probability_at_30_when_classified_then_medium() {
    assert_eq!(RiskTier::classify(30.0), RiskTier::Medium);
}

#[test]
fn given_probability_at_69_when_classified_then_medium() {
    assert_eq!(RiskTier::classify(69.0), RiskTier::Medium);
    assert_eq!(RiskTier::classify(69.9), RiskTier::Medium);
}

#[test]
fn given_probability_at_70_and_above_when_classified_then_high() {
    assert_eq!(RiskTier::classify(70.0), RiskTier::High);
    assert_eq!(RiskTier::classify(100.0), RiskTier::High);
}
