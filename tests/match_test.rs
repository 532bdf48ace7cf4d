mod common;

use assert2::check;
use common::{doc, fields, query};
use docstore_textsearch::{AnalyzedDocument, FieldList, Matcher, Tokenizer, matches};
use rstest::rstest;

// --- Document-store scenarios ---

#[rstest]
#[case("ok", &[], false)]
#[case("ok", &[("content", "ok")], true)]
#[case("ok", &[("content", "lol"), ("title", "Ok it works")], true)]
#[case("ok", &[("content", "lol")], false)]
#[case("penny", &[("content", "my two pennies")], true)]
#[case("penny", &[("content", "lol")], false)]
#[case("lol ok", &[("content", "ok")], true)]
#[case("lol ok", &[("content", "lol")], true)]
#[case("lol ok", &[("title", "lol")], true)]
#[case("lol ok", &[("content", "lol"), ("title", "Ok it works")], true)]
#[case("ok -lol", &[("content", "ok lol")], false)]
#[case("ok -lol", &[("content", "lol ok")], false)]
#[case("ok -lol", &[("content", "lol"), ("title", "Ok it works")], false)]
#[case("ok -lol", &[("content", "ok")], true)]
#[case("ok +lol", &[("content", "ok")], false)]
#[case("ok +lol", &[("content", "lol")], true)]
#[case("ok +lol", &[("content", "lol"), ("title", "Ok it works")], true)]
#[case("\"ex act ma tch\"", &[("content", "exact match")], false)]
#[case("\"ex act ma tch\"", &[("content", "lol lex act ma tch")], true)]
fn document_store_table(
    fields: FieldList,
    #[case] qs: &str,
    #[case] pairs: &[(&str, &str)],
    #[case] expected: bool,
) {
    let document = doc(pairs);
    check!(
        matches(&query(qs), &document, &fields) == expected,
        "query {:?} against {:?}",
        qs,
        document
    );
}

// --- Properties ---

/// Test: An excluded term present anywhere in the searched fields always rejects.
#[rstest]
#[case("+penny -lol")]
#[case("penny lol -lol")]
#[case("-\"two pen\" +penny")]
#[case("-lol")]
fn exclusion_dominates(fields: FieldList, #[case] qs: &str) {
    let document = doc(&[("title", "lol"), ("content", "my two pennies")]);
    check!(!matches(&query(qs), &document, &fields));
}

/// Test: Once every required term is present, optional terms do not matter.
#[rstest]
fn required_dominates_optional(fields: FieldList) {
    let q = query("+penny ok nope");
    let with_optional = doc(&[("content", "pennies ok")]);
    let without_optional = doc(&[("content", "pennies")]);
    check!(matches(&q, &with_optional, &fields));
    check!(matches(&q, &without_optional, &fields));
}

/// Test: The empty query matches every document.
#[rstest]
#[case(&[])]
#[case(&[("content", "anything at all")])]
#[case(&[("unrelated", "field")])]
fn empty_query_matches_everything(fields: FieldList, #[case] pairs: &[(&str, &str)]) {
    check!(matches(&query(""), &doc(pairs), &fields));
}

/// Test: Stem terms ignore punctuation and case; phrases need the exact spacing.
#[rstest]
fn stems_versus_phrases(fields: FieldList) {
    check!(matches(&query("ok"), &doc(&[("content", "\"Ok!\" it works.")]), &fields));
    check!(!matches(&query("\"ex act ma tch\""), &doc(&[("content", "exact match")]), &fields));
    check!(matches(&query("\"ex act ma tch\""), &doc(&[("content", "lol lex act ma tch")]), &fields));
    check!(matches(&query("\"EX ACT\""), &doc(&[("content", "lol lex act ma tch")]), &fields));
}

// --- Caching and tokenizer injection ---

/// Test: A pre-analyzed document gives the same answers as the raw document.
#[rstest]
fn analyzed_document_agrees_with_raw(fields: FieldList) {
    let documents = [
        doc(&[("title", "Ok it works"), ("content", "lol")]),
        doc(&[("content", "my two pennies")]),
        doc(&[("content", "lol lex act ma tch")]),
        doc(&[]),
    ];
    let queries = ["ok", "penny", "lol ok", "ok -lol", "ok +lol", "\"ex act ma tch\"", "", "-penny"];

    for document in &documents {
        let analyzed = AnalyzedDocument::new(document, &fields);
        for qs in queries {
            let q = query(qs);
            check!(analyzed.matches(&q) == matches(&q, document, &fields), "query {qs:?}");
        }
    }
}

/// Test: A matcher built on its own tokenizer behaves like the shared one.
#[rstest]
fn custom_tokenizer_matcher(fields: FieldList) {
    let tokenizer = Tokenizer::default();
    let matcher = Matcher::new(&tokenizer);
    let q = docstore_textsearch::Query::parse_with("+Pennies -lol", &tokenizer).unwrap();
    check!(matcher.matches(&q, &doc(&[("content", "a penny saved")]), &fields));
    check!(!matcher.matches(&q, &doc(&[("content", "a penny lol")]), &fields));
}
