use csv_to_json::conversion::{convert, ConversionOptions};

fn records(output: &str) -> serde_json::Value {
    serde_json::from_str(output).expect("output is valid JSON")
}

#[test]
fn boolean_and_number_inference_with_defaults() {
    let conv = convert("name,active,age\nJohn,yes,30", &ConversionOptions::default()).unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{"name": "John", "active": true, "age": 30}])
    );
}

#[test]
fn number_parsing_can_be_disabled() {
    let opts = ConversionOptions {
        parse_numbers: false,
        ..Default::default()
    };
    let conv = convert("age\n30", &opts).unwrap();
    assert_eq!(records(&conv.output), serde_json::json!([{"age": "30"}]));
}

#[test]
fn boolean_parsing_can_be_disabled() {
    let opts = ConversionOptions {
        parse_booleans: false,
        ..Default::default()
    };
    // "1" is no longer a boolean token, so the number chain claims it.
    let conv = convert("active,flag\nyes,1", &opts).unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{"active": "yes", "flag": 1}])
    );
}

#[test]
fn scientific_and_decimal_numbers() {
    let conv = convert("a,b,c\n1.5e3,-0.25,2E-2", &ConversionOptions::default()).unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{"a": 1500.0, "b": -0.25, "c": 0.02}])
    );
}

#[test]
fn dates_normalize_only_when_enabled() {
    let input = "when\n2024-01-15";

    let off = convert(input, &ConversionOptions::default()).unwrap();
    assert_eq!(
        records(&off.output),
        serde_json::json!([{"when": "2024-01-15"}])
    );

    let opts = ConversionOptions {
        parse_dates: true,
        ..Default::default()
    };
    let on = convert(input, &opts).unwrap();
    assert_eq!(
        records(&on.output),
        serde_json::json!([{"when": "2024-01-15T00:00:00.000Z"}])
    );
}

#[test]
fn date_shapes_all_normalize_to_the_same_day() {
    let opts = ConversionOptions {
        parse_dates: true,
        ..Default::default()
    };
    let conv = convert(
        "a,b,c,d\n01/15/2024,01-15-2024,2024/01/15,1/15/24",
        &opts,
    )
    .unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{
            "a": "2024-01-15T00:00:00.000Z",
            "b": "2024-01-15T00:00:00.000Z",
            "c": "2024-01-15T00:00:00.000Z",
            "d": "2024-01-15T00:00:00.000Z",
        }])
    );
}

#[test]
fn invalid_calendar_date_stays_a_string() {
    let opts = ConversionOptions {
        parse_dates: true,
        ..Default::default()
    };
    let conv = convert("when\n2024-13-40", &opts).unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{"when": "2024-13-40"}])
    );
}

#[test]
fn date_shaped_column_is_summarized_as_date() {
    // Type summary recognizes the shape even when date parsing is off.
    let conv = convert("when\n2024-01-15\n2024-02-20", &ConversionOptions::default()).unwrap();
    assert_eq!(conv.metadata.column_types[0].inferred, "date");
}

#[test]
fn mixed_column_including_string() {
    let conv = convert("v\n2\nAda\ntrue", &ConversionOptions::default()).unwrap();
    assert_eq!(conv.metadata.column_types[0].inferred, "mixed (string)");
}

#[test]
fn mixed_column_without_string_lists_kinds() {
    let conv = convert("v\n2\n2.5", &ConversionOptions::default()).unwrap();
    assert_eq!(
        conv.metadata.column_types[0].inferred,
        "mixed (integer, number)"
    );
}

#[test]
fn whitespace_trimming_applies_before_inference() {
    let conv = convert("age\n  30  ", &ConversionOptions::default()).unwrap();
    assert_eq!(records(&conv.output), serde_json::json!([{"age": 30}]));

    let opts = ConversionOptions {
        trim_whitespace: false,
        ..Default::default()
    };
    let conv = convert("age\n  30  ", &opts).unwrap();
    assert_eq!(records(&conv.output), serde_json::json!([{"age": "  30  "}]));
}

#[test]
fn escaped_characters_are_taken_literally() {
    // The escape consumes the delimiter, keeping it inside one field.
    let conv = convert("a,b\nx\\,y,2", &ConversionOptions::default()).unwrap();
    assert_eq!(
        records(&conv.output),
        serde_json::json!([{"a": "x,y", "b": 2}])
    );
}
