mod risk_tier;
