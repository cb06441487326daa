use document::{DocumentConfig, SvgDocument};
use kurbo::Point;
use outline::{trace_points, StrokeOptions};

fn main() {
    let opts = StrokeOptions::default();
    let centerlines = [
        vec![Point::new(10.0, 40.0), Point::new(40.0, 10.0), Point::new(70.0, 40.0)],
        vec![Point::new(25.0, 30.0), Point::new(55.0, 30.0)],
        vec![Point::new(40.0, 55.0)],
    ];

    let traced: Vec<_> = centerlines
        .iter()
        .filter_map(|points| match trace_points(points, &opts) {
            Ok(stroke) => Some(stroke),
            Err(err) => {
                eprintln!("skipping stroke: {err}");
                None
            }
        })
        .collect();

    let svg = SvgDocument::from_traced(&traced, Some("A"), &DocumentConfig::default());
    println!("{svg}");
}
