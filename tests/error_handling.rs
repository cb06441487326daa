use inkpath::{
    convert, convert_sketch_lines, CanonicalError, IngestConfig, IngestError, PipelineConfig,
    PipelineError, SourceFormat, StrokeOptions,
};

#[test]
fn length_mismatch_names_the_stroke() {
    let raw = b"[[[0],[0],[0]],[[1,2],[1],[0,10]]]";
    let result = convert(SourceFormat::Sketch, raw, &PipelineConfig::default());
    assert!(matches!(
        result,
        Err(PipelineError::Ingest(IngestError::LengthMismatch {
            stroke: 1,
            xs: 2,
            ys: 1,
            ts: 2
        }))
    ));
}

#[test]
fn malformed_inkml_trace_is_reported() {
    let raw = b"<ink><trace>0 0 0, 1 1</trace></ink>";
    let err = convert(SourceFormat::Inkml, raw, &PipelineConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::MalformedTrace { trace: 0, .. })
    ));
    assert_eq!(err.stroke_index(), Some(0));
}

#[test]
fn whiteboard_point_without_time_is_missing_field() {
    let raw = br#"<S><StrokeSet><Stroke><Point x="1" y="1"/></Stroke></StrokeSet></S>"#;
    let err = convert(SourceFormat::Whiteboard, raw, &PipelineConfig::default()).unwrap_err();
    match err {
        PipelineError::Ingest(IngestError::MissingField { stroke, field }) => {
            assert_eq!(stroke, Some(0));
            assert_eq!(field, "time");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_sketch_stroke_is_a_canonical_error() {
    let err = convert(SourceFormat::Sketch, b"[[[],[],[]]]", &PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::Canonical {
            stroke: 0,
            source: CanonicalError::EmptyStroke
        })
    ));
}

#[test]
fn distant_timestamp_is_capped_not_expanded() {
    let cfg = PipelineConfig {
        ingest: IngestConfig {
            max_input_bytes: Some(64),
            ..Default::default()
        },
        ..Default::default()
    };
    let raw = br#"[[[0,1],[0,1],[0,20000000]]]"#;
    let err = convert(SourceFormat::Sketch, raw, &cfg).unwrap_err();
    match err {
        PipelineError::Ingest(IngestError::Canonical {
            stroke: 0,
            source: CanonicalError::TooManySamples { required, limit },
        }) => {
            assert_eq!(limit, 100_000);
            assert!(required > 1_000_000);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn broken_markup_is_an_xml_error() {
    let err = convert(SourceFormat::Inkml, b"<ink><trace>", &PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(IngestError::Xml(_))));
}

#[test]
fn non_utf8_input_is_rejected() {
    let err = convert(SourceFormat::Sketch, &[0xff, 0xfe], &PipelineConfig::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(IngestError::InvalidUtf8(_))));
}

#[test]
fn oversized_input_is_rejected() {
    let cfg = PipelineConfig {
        ingest: IngestConfig {
            max_input_bytes: Some(4),
            ..Default::default()
        },
        ..Default::default()
    };
    let err = convert(SourceFormat::Sketch, b"[[[5],[5],[0]]]", &cfg).unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(IngestError::PayloadTooLarge(_))));
}

#[test]
fn invalid_outline_options_fail_before_parsing() {
    let cfg = PipelineConfig {
        outline: StrokeOptions::default().with_streamline(2.0),
        ..Default::default()
    };
    // The payload is broken too; the config error wins.
    let err = convert(SourceFormat::Sketch, b"not json", &cfg).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidConfig(_)));
}

#[test]
fn one_bad_sketch_line_does_not_affect_its_siblings() {
    let raw = "[[[0,10],[0,10],[0,20]]]\n[[[1,2],[1],[0,10]]]\n[[[5],[5],[0]]]\n";
    let results = convert_sketch_lines(raw, &PipelineConfig::default());

    let outcomes: Vec<bool> = results.iter().map(|(_, r)| r.is_ok()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    assert!(matches!(
        results[1].1,
        Err(PipelineError::Ingest(IngestError::LengthMismatch { stroke: 0, .. }))
    ));
}

#[test]
fn errors_render_readable_messages() {
    let err = convert(SourceFormat::Sketch, b"[[[1,2],[1],[0,10]]]", &PipelineConfig::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "ingest failure: stroke 0: xs/ys/ts lengths differ (2/1/2)"
    );
}
