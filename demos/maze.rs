//! Solve an ASCII maze and print the path.
//!
//! Run: cargo run --bin maze [MAP_FILE]
//!
//! Without a file argument a built-in sample map is used. Maps use `#` for
//! walls, `.` or space for floor, and must contain one `S` and one `G`.

use paparazzo_demos::{SAMPLE_MAP, load_map, solve};

fn main() {
    let text = match std::env::args().nth(1) {
        Some(path) => match load_map(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => SAMPLE_MAP.to_string(),
    };

    match solve(&text) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
