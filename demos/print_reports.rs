//! Print report lines for a few sample packages

use workout_flux::{read_package, Workout, UNKNOWN_WORKOUT_MESSAGE};

fn main() {
    let packages: [(&str, &[f64]); 4] = [
        ("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]),
        ("RUN", &[15000.0, 1.0, 75.0]),
        ("WLK", &[9000.0, 1.0, 75.0, 180.0]),
        ("BIK", &[3000.0, 1.0, 70.0]),
    ];

    for (code, data) in packages {
        match read_package(code, data) {
            Ok(Some(training)) => println!("{}", training.training_info()),
            Ok(None) => println!("{UNKNOWN_WORKOUT_MESSAGE}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
