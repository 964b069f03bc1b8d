use std::str::FromStr;

use crate::Topic;

#[test]
fn given_topic_when_round_tripped_through_str_then_identical() {
    for topic in Topic::ALL {
        assert_eq!(Topic::from_str(topic.as_str()).unwrap(), topic);
    }
}

#[test]
fn given_unknown_name_when_parsed_then_error() {
    assert!(Topic::from_str("metrics").is_err());
    assert!(Topic::from_str("").is_err());
}
