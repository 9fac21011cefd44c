use hidden_objects::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Ask for more points than the area can hold at the given spacing and
// watch the attempt budget run out.
fn main() {
    hidden_objects_examples::init_tracing();
    let mut rng = StdRng::seed_from_u64(1);

    for min_distance in [20.0_f32, 55.0, 120.0, 250.0] {
        let sampler = RejectionSampling::new(min_distance, 220);
        let (points, report) = sampler.run(2200.0, 1200.0, &mut rng);
        println!(
            "min_distance {min_distance:>5}: {:>3}/{} points after {:>5}/{} attempts{}",
            points.len(),
            report.requested,
            report.attempts,
            report.budget,
            if report.is_underfilled() { " (under-filled)" } else { "" },
        );
    }
}
