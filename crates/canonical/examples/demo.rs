use canonical::{resample, RawSample};

fn main() {
    let raw = vec![
        RawSample::new(0.0, 0.0, 0.0),
        RawSample::new(40.0, 10.0, 60.0),
        RawSample::new(45.0, 12.0, 70.0),
    ];

    let dense = resample(&raw, 10.0).expect("resample succeeds");
    println!("raw samples: {}", raw.len());
    println!("resampled samples: {}", dense.len());
    for sample in &dense {
        println!("  ({:.2}, {:.2}) @ {:.2}", sample.x, sample.y, sample.t);
    }
}
