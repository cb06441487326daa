use canonical::SourceFormat;
use ingest::{ingest, IngestConfig, InkAdapter, SketchAdapter};

const WHITEBOARD: &str = r#"<WhiteboardCaptureSession>
  <Transcription><TextLine text="hi"/></Transcription>
  <StrokeSet>
    <Stroke colour="black" start_time="0.00" end_time="0.05">
      <Point x="10" y="10" time="0.00"/>
      <Point x="12" y="30" time="0.05"/>
    </Stroke>
  </StrokeSet>
</WhiteboardCaptureSession>"#;

const SKETCHES: &str = r#"{"word":"line","key_id":"1","recognized":true,"drawing":[[[0,50],[0,0],[0,30]]]}
{"word":"broken","key_id":"2","drawing":[[[0,50],[0],[0,30]]]}
"#;

fn main() {
    let cfg = IngestConfig::default();

    match ingest(SourceFormat::Whiteboard, WHITEBOARD.as_bytes(), &cfg) {
        Ok(doc) => println!("{doc:#?}"),
        Err(err) => eprintln!("ingest failed: {err}"),
    }

    let adapter = SketchAdapter::new(cfg);
    for (line, result) in adapter.parse_lines(SKETCHES) {
        match result {
            Ok(doc) => println!(
                "line {line}: {} strokes, {} samples, label {:?}",
                doc.strokes.len(),
                doc.sample_count(),
                doc.label
            ),
            Err(err) => eprintln!("line {line}: {err}"),
        }
    }

    println!("adapter format: {}", adapter.format());
}
