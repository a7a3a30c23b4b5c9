use filter_lang::{Filter, Relation, TermValue};

fn round_trips(text: &str) {
    let filter = Filter::from_string(text);
    let serialized = filter.to_filter_string();
    assert_eq!(
        Filter::from_string(&serialized),
        filter,
        "reparse of '{}' differs",
        serialized
    );
}

#[test]
fn test_default_results_filter_end_to_end() {
    let text = "apply_overrides=0 levels=hml rows=100 min_qod=70 first=1 sort=compliant";
    let filter = Filter::from_string(text);

    assert_eq!(filter.len(), 6);
    assert_eq!(filter.get("rows"), Some(&TermValue::Int(100)));
    assert_eq!(filter.get("first"), Some(&TermValue::Int(1)));
    assert_eq!(filter.get("apply_overrides"), Some(&TermValue::Int(0)));
    assert_eq!(filter.get("min_qod"), Some(&TermValue::Int(70)));
    assert_eq!(
        filter.get("sort"),
        Some(&TermValue::Text("compliant".to_string()))
    );

    let rows_term = filter
        .iter()
        .find(|t| t.keyword.as_deref() == Some("rows"))
        .unwrap();
    assert_eq!(rows_term.relation, Some(Relation::Equals));

    // Serialization is byte-identical for an already-canonical string.
    assert_eq!(filter.to_filter_string(), text);
}

#[test]
fn test_ascii_keyword_value_filters_round_trip() {
    round_trips("severity>3 rows=10");
    round_trips("task_id=b77e1f7c name=scan sort-reverse=created");
    round_trips("cvss_base>4.5 cvss_base<9");
    round_trips("severity>3 and severity<8");
    round_trips("not status=Done");
    round_trips("re \"[0-9]+\"");
}

#[test]
fn test_quoted_values_round_trip() {
    round_trips("name=\"foo bar\"");
    round_trips("\"free text with spaces\" rows=5");
}

#[test]
fn test_normalization_is_idempotent() {
    // Non-canonical input normalizes once, then stays fixed.
    for text in [
        "  rows=10   first=0 ",
        "apply_overrides=5",
        "first<3",
        "rows=10 rows=20",
    ] {
        let once = Filter::from_string(text).to_filter_string();
        let twice = Filter::from_string(&once).to_filter_string();
        assert_eq!(once, twice, "normalization of '{}' is not stable", text);
    }
}

#[test]
fn test_pagination_defaults_normalize_in_string_form() {
    assert_eq!(
        Filter::from_string("first=-3 rows=100").to_filter_string(),
        "first=1 rows=100"
    );
    assert_eq!(
        Filter::from_string("apply_overrides=5").to_filter_string(),
        "apply_overrides=1"
    );
}

#[test]
fn test_numeric_shorthand_serializes_as_approx_term() {
    let filter = Filter::from_string("7<8");
    assert_eq!(filter.to_filter_string(), "~\"7<8\"");
}

#[test]
fn test_unknown_tokens_are_preserved_verbatim() {
    round_trips("nonexistent_keyword=abc xyzzy");
    assert_eq!(
        Filter::from_string("nonexistent_keyword=abc").to_filter_string(),
        "nonexistent_keyword=abc"
    );
}

#[test]
fn test_unterminated_quote_is_not_an_error() {
    let filter = Filter::from_string("name=\"half typed");
    assert_eq!(
        filter.get("name"),
        Some(&TermValue::Text("half typed".to_string()))
    );
}

#[test]
fn test_escaped_quotes_round_trip() {
    round_trips("name=\"say \\\" it\"");
}
