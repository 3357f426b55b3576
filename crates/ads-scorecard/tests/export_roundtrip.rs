//! Export output read back with an RFC 4180 reader.

use ads_scorecard::{export_csv, EvidenceItem, ScorecardDocument, CSV_HEADER};
use ads_test_utils::{demo_document, document_json_with_evidence, parse_csv, sample_document};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn demo_export_is_sorted_and_quoted() {
    let document = demo_document();
    let file = export_csv(&document.evidence).unwrap();
    let text = file.text();

    assert!(text.starts_with(
        "\"item_id\",\"section\",\"score\",\"max_score\",\"response\",\"evidence\"\n"
    ));
    assert!(text.contains("\"\"Let's pause and check the plan\"\""));

    let records = parse_csv(text);
    assert_eq!(records.len(), 5);
    assert_eq!(records[0], CSV_HEADER.to_vec());
    let ids: Vec<&str> = records[1..].iter().map(|r| r[0].as_str()).collect();
    assert_eq!(ids, vec!["cm-01", "ps-01", "ps-03", "sa-02"]);
}

#[test]
fn missing_scores_export_as_dash() {
    let json = r#"{
        "score_run_id": "run-1",
        "generated_at": "2024-05-01T14:03:09Z",
        "candidate": {"name": "A", "cohort": "B"},
        "assessment": {"title": "T", "version": "1"},
        "totals": {"total_score": 0, "max_score": 0},
        "evidence": [{"item_id": "x", "section": "S", "score": null, "response": null}]
    }"#;
    let document = ScorecardDocument::from_json_str(json).unwrap();
    let records = parse_csv(export_csv(&document.evidence).unwrap().text());
    assert_eq!(records[1], vec!["x", "S", "-", "-", "", ""]);
}

#[test]
fn export_reorders_without_touching_the_document() {
    let document = sample_document();
    let file = export_csv(&document.evidence).unwrap();

    let records = parse_csv(file.text());
    assert_eq!(records[1][0], "a1");
    assert_eq!(records[2][0], "b2");
    assert_eq!(document.evidence[0].item_id, "b2");
}

#[test]
fn digest_is_stable_across_input_order() {
    let forward = ScorecardDocument::from_json_str(&document_json_with_evidence(&["a", "b", "c"])).unwrap();
    let backward = ScorecardDocument::from_json_str(&document_json_with_evidence(&["c", "b", "a"])).unwrap();

    let forward = export_csv(&forward.evidence).unwrap();
    let backward = export_csv(&backward.evidence).unwrap();
    assert_eq!(forward.bytes, backward.bytes);
    assert_eq!(forward.sha256_hex(), backward.sha256_hex());
}

proptest! {
    #[test]
    fn arbitrary_text_survives_quoting(
        response in "[ -~\n\"]{0,40}",
        evidence in "[ -~\n\"]{0,40}",
    ) {
        let items = vec![
            EvidenceItem::new("q1", "Section, One")
                .with_scores(1.0, 2.0)
                .with_response(response.clone())
                .with_evidence(evidence.clone()),
        ];
        let file = export_csv(&items).unwrap();
        let records = parse_csv(file.text());

        prop_assert_eq!(records.len(), 2);
        prop_assert_eq!(&records[1][1], "Section, One");
        prop_assert_eq!(&records[1][4], &response);
        prop_assert_eq!(&records[1][5], &evidence);
    }
}
